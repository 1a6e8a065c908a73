//! Attempt budget, per-attempt timeout, and exponential backoff.

use std::time::Duration;

use pm_config::LlmConfig;

/// Retry behavior for completion calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Wall-clock budget for a single attempt.
    pub attempt_timeout: Duration,
    /// Delay unit; the sleep after attempt `n` is `base_delay * 2^n`.
    pub base_delay: Duration,
    /// Maximum delay between attempts (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_secs(60),
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            attempt_timeout: config.timeout(),
            base_delay: config.backoff_base(),
            ..Self::default()
        }
    }

    /// Sleep before attempt `attempt + 1`, where `attempt` is 1-based.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Whether another attempt is allowed after `attempt` attempts.
    #[must_use]
    pub const fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}
