//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Letter keys
//! pick tools; the editor treats those as hold-to-override (see
//! `bindings`).

use crate::tools::ToolKind;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolSelect,
    ToolAddNode,
    ToolAddEdge,
    ToolRectangle,
    ToolFindPath,
    ToolDelete,

    // ── Edit ──
    Undo,
    Redo,
    /// Drop the pending edge start and the selection.
    Cancel,

    // ── View ──
    ResetView,
}

impl ShortcutAction {
    /// The tool a tool-switching action selects.
    pub fn tool(self) -> Option<ToolKind> {
        match self {
            ShortcutAction::ToolSelect => Some(ToolKind::Select),
            ShortcutAction::ToolAddNode => Some(ToolKind::AddNode),
            ShortcutAction::ToolAddEdge => Some(ToolKind::AddEdge),
            ShortcutAction::ToolRectangle => Some(ToolKind::Rectangle),
            ShortcutAction::ToolFindPath => Some(ToolKind::FindPath),
            ShortcutAction::ToolDelete => Some(ToolKind::Delete),
            _ => None,
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Escape"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "n" | "N" => Some(ShortcutAction::ToolAddNode),
            "e" | "E" => Some(ShortcutAction::ToolAddEdge),
            "r" | "R" => Some(ShortcutAction::ToolRectangle),
            "f" | "F" => Some(ShortcutAction::ToolFindPath),
            "d" | "D" => Some(ShortcutAction::ToolDelete),
            "Escape" => Some(ShortcutAction::Cancel),
            _ => None,
        }
    }
}
