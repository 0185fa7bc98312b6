//! Retry with bounded exponential backoff.
//!
//! The executor is opaque to error kind: every failure is retried until
//! the attempt budget runs out, and the error from the final attempt is
//! returned unchanged so callers can still match on its kind.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default retry configuration
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5000;

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after each failure
    pub base_delay_ms: u64,
    /// Upper bound on any single delay
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with custom settings
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Delay after failed attempt `attempt` (1-based):
    /// `min(base_delay_ms * 2^(attempt - 1), max_delay_ms)`
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
        let delay_ms = self.base_delay_ms.saturating_mul(factor);
        Duration::from_millis(delay_ms.min(self.max_delay_ms))
    }
}

/// Run `operation` up to `config.max_attempts` times, sleeping between
/// attempts.
///
/// Returns the first success, or the error from the final attempt
/// unwrapped. A `max_attempts` of 0 is treated as 1.
///
/// # Example
/// ```ignore
/// let users = retry(&config.retry, "user fetch", || self.fetch_users(count)).await?;
/// ```
pub async fn retry<T, E, F, Fut>(config: &RetryConfig, label: &str, operation: F) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("{} succeeded on attempt {} of {}", label, attempt, max_attempts);
                }
                return Ok(value);
            }
            Err(err) if attempt < max_attempts => {
                let delay = config.delay_after_attempt(attempt);
                tracing::warn!(
                    "{} failed on attempt {} of {}, retrying in {:?}: {}",
                    label,
                    attempt,
                    max_attempts,
                    delay,
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!("{} failed after {} attempts: {}", label, max_attempts, err);
                return Err(err);
            }
        }
    }
}
