use std::time::Duration;

/// Bounded retry with a fixed delay between attempts.
///
/// `retries` counts attempts after the first one, so a policy with
/// `retries = 5` makes at most six attempts. There is no exponential
/// backoff and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay: Duration,
    /// Upper bound for a single connection attempt.
    pub attempt_timeout: Duration,
}

impl RetryPolicy {
    pub fn fixed(retries: u32, delay: Duration) -> Self {
        Self {
            retries,
            delay,
            ..Self::default()
        }
    }

    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Total number of attempts, including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    /// Returns the retries left after `attempt` (1-based) failed.
    pub fn retries_left(&self, attempt: u32) -> u32 {
        self.max_attempts().saturating_sub(attempt)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 5,
            delay: Duration::from_secs(5),
            attempt_timeout: Duration::from_secs(5),
        }
    }
}
