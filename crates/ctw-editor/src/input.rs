//! Input abstraction layer.
//!
//! Normalizes pointer, wheel and keyboard events from the host into a
//! single `InputEvent` enum. Pointer coordinates are in screen space; the
//! editor converts them through the viewport.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Which pointer button changed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` index.
    pub fn from_index(index: i16) -> Self {
        match index {
            1 => PointerButton::Middle,
            2 => PointerButton::Secondary,
            _ => PointerButton::Primary,
        }
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
    },
    /// Pointer left the drawing surface.
    PointerLeave,
    /// Wheel scroll over the surface. Positive `delta_y` zooms out.
    Wheel {
        x: f64,
        y: f64,
        delta_y: f64,
    },
    KeyDown {
        key: String,
        modifiers: Modifiers,
        /// A text input elsewhere on the page has focus.
        text_focus: bool,
    },
    KeyUp {
        key: String,
    },
}

impl InputEvent {
    /// Extract the screen position of pointer and wheel events.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Wheel { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_ctrl_or_meta() {
        assert!(!Modifiers::NONE.command());
        let mac = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert!(mac.command());
        let other = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(other.command());
    }

    #[test]
    fn button_from_dom_index() {
        assert_eq!(PointerButton::from_index(0), PointerButton::Primary);
        assert_eq!(PointerButton::from_index(1), PointerButton::Middle);
        assert_eq!(PointerButton::from_index(2), PointerButton::Secondary);
    }

    #[test]
    fn position_of_events() {
        let down = InputEvent::PointerDown {
            x: 3.0,
            y: 4.0,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        };
        assert_eq!(down.position(), Some((3.0, 4.0)));
        assert_eq!(InputEvent::PointerLeave.position(), None);
    }
}
