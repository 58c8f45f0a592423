//! Bounded retry for work that waits on a resource the runtime delivers
//! asynchronously, such as the first paint of an off-screen browser.

use std::time::Duration;

/// Attempts after the first one before giving up.
pub const MAX_RETRY: u32 = 4;

/// Delay between two attempts.
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetryState {
    /// The first attempt has not checked the resource yet.
    Waiting,
    /// Retry `n` is scheduled, `1 <= n <= MAX_RETRY`.
    Retrying(u32),
    Succeeded,
    Failed,
}

impl RetryState {
    /// The state in which attempt `attempt` runs. Attempt 0 is the first one.
    pub fn for_attempt(attempt: u32) -> Self {
        match attempt {
            0 => Self::Waiting,
            n if n <= MAX_RETRY => Self::Retrying(n),
            _ => Self::Failed,
        }
    }

    /// The attempt this state is waiting to run, if it is not terminal.
    pub fn attempt(self) -> Option<u32> {
        match self {
            Self::Waiting => Some(0),
            Self::Retrying(n) => Some(n),
            Self::Succeeded | Self::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// The state after an attempt found the resource present or absent.
    /// Terminal states never change.
    pub fn advance(self, resource_present: bool) -> Self {
        let Some(attempt) = self.attempt() else {
            return self;
        };
        if resource_present {
            Self::Succeeded
        } else if attempt < MAX_RETRY {
            Self::Retrying(attempt + 1)
        } else {
            Self::Failed
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn absent_resource_fails_exactly_at_the_limit() {
        let mut state = RetryState::Waiting;
        let mut seen = vec![state];
        while !state.is_terminal() {
            state = state.advance(false);
            seen.push(state);
        }

        assert_eq!(
            seen,
            [
                RetryState::Waiting,
                RetryState::Retrying(1),
                RetryState::Retrying(2),
                RetryState::Retrying(3),
                RetryState::Retrying(4),
                RetryState::Failed,
            ]
        );
    }

    #[test]
    fn present_resource_succeeds_from_any_attempt() {
        for attempt in 0..=MAX_RETRY {
            assert_eq!(
                RetryState::for_attempt(attempt).advance(true),
                RetryState::Succeeded
            );
        }
    }

    #[test]
    fn terminal_states_stay_put() {
        for state in [RetryState::Succeeded, RetryState::Failed] {
            assert_eq!(state.advance(false), state);
            assert_eq!(state.advance(true), state);
            assert_eq!(state.attempt(), None);
        }
    }

    #[test]
    fn attempts_past_the_limit_are_failures() {
        assert_eq!(RetryState::for_attempt(MAX_RETRY + 1), RetryState::Failed);
        assert_eq!(RetryState::for_attempt(MAX_RETRY).attempt(), Some(MAX_RETRY));
    }
}
