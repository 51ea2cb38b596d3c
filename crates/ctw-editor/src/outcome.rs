//! What an editing event did.

use ctw_core::PlacementError;
use std::fmt;

/// Soft failures surfaced to the user as a transient notice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditWarning {
    Placement(PlacementError),
}

impl fmt::Display for EditWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditWarning::Placement(e) => e.fmt(f),
        }
    }
}

impl From<PlacementError> for EditWarning {
    fn from(e: PlacementError) -> Self {
        EditWarning::Placement(e)
    }
}

/// Result of feeding one event (or intent) to the editor.
///
/// Hosts use it to decide what to redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Unchanged,
    /// Selection or pending edge endpoint changed.
    SelectionChanged,
    /// Zoom or pan changed.
    ViewChanged,
    /// The active tool changed.
    ToolChanged,
    /// The graph changed (one history entry).
    Mutated,
    /// Nothing changed; a notice was raised.
    Rejected(EditWarning),
}

impl EditOutcome {
    /// Whether the host should redraw.
    pub fn needs_render(&self) -> bool {
        !matches!(self, EditOutcome::Unchanged)
    }
}
