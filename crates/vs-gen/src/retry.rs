//! Retry with exponential backoff.

use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`,
    /// capped at `max_delay`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent. Only [`GenerationError::QuotaExceeded`] is
/// retried.
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay(attempt);
                log::warn!(
                    "{err}; retrying in {}ms (attempt {}/{})",
                    delay.as_millis(),
                    attempt + 1,
                    policy.max_retries
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                if matches!(err, GenerationError::QuotaExceeded) {
                    log::error!("retry budget exhausted after {} retries", policy.max_retries);
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    #[test]
    fn delays_double_and_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0), Duration::from_secs(2));
        assert_eq!(policy.delay(1), Duration::from_secs(4));
        assert_eq!(policy.delay(2), Duration::from_secs(8));
        assert_eq!(policy.delay(4), Duration::from_secs(30));
        assert_eq!(policy.delay(40), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_quota_then_succeeds() {
        let calls = Cell::new(0);
        let start = Instant::now();
        let result = retry_with_backoff(&RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Err(GenerationError::QuotaExceeded)
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(start.elapsed(), Duration::from_secs(2 + 4));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_budget() {
        let calls = Cell::new(0);
        let result: Result<()> = retry_with_backoff(&RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Err(GenerationError::QuotaExceeded) }
        })
        .await;

        assert_eq!(result, Err(GenerationError::QuotaExceeded));
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn session_errors_are_not_retried() {
        let calls = Cell::new(0);
        let start = Instant::now();
        let result: Result<()> = retry_with_backoff(&RetryPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Err(GenerationError::SessionInvalid) }
        })
        .await;

        assert_eq!(result, Err(GenerationError::SessionInvalid));
        assert_eq!(calls.get(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
