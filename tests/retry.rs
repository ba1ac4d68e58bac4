//! Retry wrapper semantics: attempt counting, backoff, and propagation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use vocabulary_ai::{retry_with_backoff, Error, RetryPolicy};

fn rate_limited(retry_after_ms: Option<u64>) -> Error {
    Error::Remote {
        status: 429,
        class: "rate_limited".to_string(),
        message: "quota exceeded".to_string(),
        retryable: true,
        retry_after_ms,
    }
}

fn terminal() -> Error {
    Error::Remote {
        status: 400,
        class: "invalid_request".to_string(),
        message: "bad prompt".to_string(),
        retryable: false,
        retry_after_ms: None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_succeeds_after_transient_rate_limits() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, Error> =
        retry_with_backoff(RetryPolicy::new(3, Duration::from_millis(100)), || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(rate_limited(None))
                } else {
                    Ok(99)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 99);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_success_short_circuits_remaining_attempts() {
    let calls = AtomicU32::new(0);
    let result: Result<&str, Error> = retry_with_backoff(RetryPolicy::default(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok("first try") }
    })
    .await;

    assert_eq!(result.unwrap(), "first try");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_non_rate_limit_error_propagates_without_retry() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, Error> = retry_with_backoff(RetryPolicy::default(), || {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Err(terminal()) }
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(err, Error::Remote { status: 400, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_persistent_rate_limit_consumes_exactly_max_retries() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, Error> =
        retry_with_backoff(RetryPolicy::new(3, Duration::from_millis(50)), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(rate_limited(None)) }
        })
        .await;

    let err = result.unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(err.is_rate_limited());
}

#[tokio::test(start_paused = true)]
async fn test_backoff_grows_exponentially_without_a_hint() {
    let calls = AtomicU32::new(0);
    let start = tokio::time::Instant::now();
    let _: Result<u32, Error> =
        retry_with_backoff(RetryPolicy::new(3, Duration::from_millis(100)), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(rate_limited(None)) }
        })
        .await;

    // Two waits: 100ms * 2^0 + 100ms * 2^1.
    assert_eq!(start.elapsed(), Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_provider_hint_overrides_computed_backoff() {
    let calls = AtomicU32::new(0);
    let start = tokio::time::Instant::now();
    let result: Result<u32, Error> =
        retry_with_backoff(RetryPolicy::new(2, Duration::from_millis(100)), || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(rate_limited(Some(5_000)))
                } else {
                    Ok(1)
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), 1);
    assert_eq!(start.elapsed(), Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_zero_attempt_budget_reports_retries_exhausted() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, Error> =
        retry_with_backoff(RetryPolicy::new(0, Duration::from_millis(100)), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(1) }
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(matches!(
        result.unwrap_err(),
        Error::RetriesExhausted { attempts: 0 }
    ));
}
