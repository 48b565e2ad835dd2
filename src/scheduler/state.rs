//! Poller state threaded through the polling loop.

use chrono::Utc;

/// Loop-local state of the status poller.
///
/// Held only in memory; a restart begins from the current time with no
/// notification history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (Unix seconds) of the next fetch window.
    cursor: i64,

    /// Last successfully delivered message, status or failure.
    last_message: Option<String>,
}

impl PollState {
    /// Creates state with the cursor at the given timestamp.
    #[must_use]
    pub const fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_message: None,
        }
    }

    /// Creates state with the cursor at the current time.
    #[must_use]
    pub fn starting_now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    /// Returns the current poll cursor.
    #[must_use]
    pub const fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Returns the last delivered message.
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    /// Moves the cursor to the server-supplied date, if there is one.
    pub fn advance_cursor(&mut self, current_date: Option<i64>) {
        if let Some(date) = current_date {
            self.cursor = date;
        }
    }

    /// Checks whether `message` differs from the last delivered one.
    #[must_use]
    pub fn is_new(&self, message: &str) -> bool {
        self.last_message.as_deref() != Some(message)
    }

    /// Records a successfully delivered message.
    pub fn remember(&mut self, message: String) {
        self.last_message = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = PollState::new(100);
        assert_eq!(state.cursor(), 100);
        assert!(state.last_message().is_none());
    }

    #[test]
    fn test_starting_now_uses_current_time() {
        let before = Utc::now().timestamp();
        let state = PollState::starting_now();
        assert!(state.cursor() >= before);
    }

    #[test]
    fn test_advance_cursor_keeps_value_when_absent() {
        let mut state = PollState::new(100);
        state.advance_cursor(None);
        assert_eq!(state.cursor(), 100);
        state.advance_cursor(Some(250));
        assert_eq!(state.cursor(), 250);
    }

    #[test]
    fn test_is_new_after_remember() {
        let mut state = PollState::new(0);
        assert!(state.is_new("a"));
        state.remember("a".to_owned());
        assert!(!state.is_new("a"));
        assert!(state.is_new("b"));
    }
}
