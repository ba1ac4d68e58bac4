//! Bounded retry with exponential backoff for rate-limited provider calls.
//!
//! Only rate-limit rejections are retried; every other failure propagates
//! immediately. When the provider supplies a retry hint it takes precedence
//! over the computed backoff.

use std::future::Future;
use std::time::Duration;

use crate::error::Error;

/// Retry classification seam.
///
/// The wrapper decides through this trait, not by inspecting provider
/// payloads, so swapping AI providers never touches the retry logic.
pub trait RetryClass: Sized {
    /// Is this a transient rate-limit rejection worth waiting out?
    fn is_rate_limited(&self) -> bool;

    /// Provider-supplied wait hint, if any.
    fn retry_after(&self) -> Option<Duration> {
        None
    }

    /// Terminal error raised when every attempt was consumed without an
    /// earlier propagation.
    fn retries_exhausted(attempts: u32) -> Self;
}

impl RetryClass for Error {
    fn is_rate_limited(&self) -> bool {
        Error::is_rate_limited(self)
    }

    fn retry_after(&self) -> Option<Duration> {
        self.retry_after_ms().map(Duration::from_millis)
    }

    fn retries_exhausted(attempts: u32) -> Self {
        Error::RetriesExhausted { attempts }
    }
}

/// Attempt budget and backoff base for [`retry_with_backoff`].
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts: one initial call plus up to `max_retries - 1` retries.
    pub max_retries: u32,
    /// Backoff base; attempt `n` (zero-based) waits `base_delay * 2^n`.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Invoke `operation` until it succeeds, retrying only rate-limited
/// failures, up to `policy.max_retries` total attempts.
///
/// Delay between attempts prefers the error's own retry hint and falls back
/// to exponential backoff. The sleep is a scheduling yield, not a thread
/// block. A rate-limited failure on the final attempt, or any non-rate-limit
/// failure, propagates unchanged.
pub async fn retry_with_backoff<T, E, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, E>
where
    E: RetryClass,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    for attempt in 0..policy.max_retries {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if err.is_rate_limited() && attempt + 1 < policy.max_retries {
                    let delay = err.retry_after().unwrap_or_else(|| policy.backoff_delay(attempt));
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = policy.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited, backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
                return Err(err);
            }
        }
    }

    // Reachable only with a zero-attempt budget.
    Err(E::retries_exhausted(policy.max_retries))
}
