//! Transient advisory messages.
//!
//! Time comes from the host (milliseconds, e.g. `Date.now()`); a notice
//! expires once `duration_ms` has passed since it was raised.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub message: String,
    pub raised_at_ms: f64,
}

#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    duration_ms: f64,
}

impl NoticeBoard {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            current: None,
            duration_ms,
        }
    }

    /// Show `message`, replacing any notice still on screen.
    pub fn raise(&mut self, message: impl Into<String>, now_ms: f64) {
        self.current = Some(Notice {
            message: message.into(),
            raised_at_ms: now_ms,
        });
    }

    /// The notice visible at `now_ms`, if any.
    pub fn current(&self, now_ms: f64) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|n| now_ms - n.raised_at_ms < self.duration_ms)
    }

    /// Drop an expired notice. Returns whether one was dropped.
    pub fn prune(&mut self, now_ms: f64) -> bool {
        if self.current.is_some() && self.current(now_ms).is_none() {
            self.current = None;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_duration() {
        let mut board = NoticeBoard::new(3000.0);
        assert!(board.current(0.0).is_none());

        board.raise("left side only", 1000.0);
        assert_eq!(
            board.current(3999.0).map(|n| n.message.as_str()),
            Some("left side only")
        );
        assert!(board.current(4000.0).is_none());
        assert!(board.prune(4000.0));
        assert!(!board.prune(4000.0));
    }

    #[test]
    fn raise_restarts_timer() {
        let mut board = NoticeBoard::new(3000.0);
        board.raise("first", 0.0);
        board.raise("second", 2500.0);
        let shown = board.current(5000.0);
        assert_eq!(shown.map(|n| n.message.as_str()), Some("second"));
    }

    #[test]
    fn dismiss_clears() {
        let mut board = NoticeBoard::new(3000.0);
        board.raise("x", 0.0);
        board.dismiss();
        assert!(board.current(1.0).is_none());
    }
}
