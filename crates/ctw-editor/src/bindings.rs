//! Keyboard bindings with hold-to-override tools.
//!
//! While a tool letter is held, that tool is active; releasing the key
//! returns to the tool picked on the toolbar. Nothing fires while a text
//! field has focus or while the bindings are detached.

use crate::input::Modifiers;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::ToolKind;

/// What a key press means to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResponse {
    Ignored,
    /// Activate this tool until the key is released.
    Hold(ToolKind),
    Action(ShortcutAction),
}

#[derive(Debug, Default)]
pub struct KeyBindings {
    attached: bool,
    /// Lowercased key currently holding a tool override.
    held: Option<String>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start listening.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop listening. Returns whether an override was in effect.
    pub fn detach(&mut self) -> bool {
        self.attached = false;
        self.held.take().is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn key_down(&mut self, key: &str, modifiers: Modifiers, text_focus: bool) -> KeyResponse {
        if !self.attached || text_focus {
            return KeyResponse::Ignored;
        }
        let Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        } = modifiers;
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return KeyResponse::Ignored;
        };
        match action.tool() {
            Some(tool) => {
                let key = key.to_lowercase();
                // Auto-repeat of the held key.
                if self.held.as_deref() == Some(key.as_str()) {
                    return KeyResponse::Ignored;
                }
                self.held = Some(key);
                KeyResponse::Hold(tool)
            }
            None => KeyResponse::Action(action),
        }
    }

    /// Returns whether this release ends the tool override.
    pub fn key_up(&mut self, key: &str) -> bool {
        let key = key.to_lowercase();
        if self.held.as_deref() == Some(key.as_str()) {
            self.held = None;
            return true;
        }
        false
    }

    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Forget the held key without waiting for its release.
    pub fn release(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attached() -> KeyBindings {
        let mut b = KeyBindings::new();
        b.attach();
        b
    }

    #[test]
    fn detached_bindings_ignore_keys() {
        let mut b = KeyBindings::new();
        assert_eq!(b.key_down("n", Modifiers::NONE, false), KeyResponse::Ignored);
        b.attach();
        assert_eq!(
            b.key_down("n", Modifiers::NONE, false),
            KeyResponse::Hold(ToolKind::AddNode)
        );
        assert!(b.detach());
        assert!(!b.is_holding());
    }

    #[test]
    fn text_focus_suppresses() {
        let mut b = attached();
        assert_eq!(b.key_down("e", Modifiers::NONE, true), KeyResponse::Ignored);
        assert!(!b.is_holding());
    }

    #[test]
    fn hold_and_release() {
        let mut b = attached();
        assert_eq!(
            b.key_down("d", Modifiers::NONE, false),
            KeyResponse::Hold(ToolKind::Delete)
        );
        assert_eq!(b.key_down("d", Modifiers::NONE, false), KeyResponse::Ignored);
        assert!(!b.key_up("e"));
        assert!(b.key_up("D"));
        assert!(!b.is_holding());
    }

    #[test]
    fn second_letter_takes_over_hold() {
        let mut b = attached();
        b.key_down("n", Modifiers::NONE, false);
        assert_eq!(
            b.key_down("e", Modifiers::NONE, false),
            KeyResponse::Hold(ToolKind::AddEdge)
        );
        // Releasing the first key no longer ends the override.
        assert!(!b.key_up("n"));
        assert!(b.key_up("e"));
    }

    #[test]
    fn command_keys_are_actions() {
        let mut b = attached();
        let cmd = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert_eq!(
            b.key_down("z", cmd, false),
            KeyResponse::Action(ShortcutAction::Undo)
        );
        assert_eq!(
            b.key_down("Escape", Modifiers::NONE, false),
            KeyResponse::Action(ShortcutAction::Cancel)
        );
    }
}
