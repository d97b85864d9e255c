// Attempt budget and backoff schedule

use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Attempt budget and backoff schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Wait after a failed `attempt` (1-based): `base * 2^(attempt-1)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(1u32 << exp)
    }
}

/// Attempt counter for one fetch call. Dropped when the call returns.
///
/// The last observed failure is owned by the fetch loop next to this counter,
/// so it can be moved out untouched as `FetchError::Network` on exhaustion.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryState {
    pub attempt: u32,
    max: u32,
}

impl RetryState {
    pub fn new(max: u32) -> Self {
        Self {
            attempt: 1,
            max: max.max(1),
        }
    }

    pub fn exhausted(&self) -> bool {
        self.attempt >= self.max
    }

    pub fn advance(&mut self) {
        self.attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles_from_half_second() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_secs(1));
        assert_eq!(policy.backoff(3), Duration::from_secs(2));
    }

    #[test]
    fn state_is_exhausted_on_last_attempt() {
        let mut state = RetryState::new(DEFAULT_MAX_RETRIES);
        assert!(!state.exhausted());
        state.advance();
        assert!(!state.exhausted());
        state.advance();
        assert_eq!(state.attempt, 3);
        assert!(state.exhausted());
    }

    #[test]
    fn zero_budget_still_allows_one_attempt() {
        assert!(RetryState::new(0).exhausted());
    }
}
