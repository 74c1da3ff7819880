use std::time::Duration;

/// Doublings stop here; later waits saturate anyway.
const MAX_DOUBLINGS: u32 = 31;

/// Wait before the GET attempt that follows failed attempt `attempt` (0-based).
///
/// The backoff doubles per failure and saturates at [`Duration::MAX`].
/// With the default 100 ms backoff and three retries a transfer waits
/// 100 ms, 200 ms, then 400 ms.
///
/// ```
/// use std::time::Duration;
/// use gatefetch_fetch::core::retry_delay;
///
/// let backoff = Duration::from_millis(100);
/// assert_eq!(retry_delay(2, backoff), Duration::from_millis(400));
/// ```
pub fn retry_delay(attempt: u32, backoff: Duration) -> Duration {
    backoff
        .checked_mul(1 << attempt.min(MAX_DOUBLINGS))
        .unwrap_or(Duration::MAX)
}

/// Returns `true` if a GET answered with `status` is worth another attempt.
///
/// Request timeouts, rate limiting and server errors are transient; every
/// other failure status is final.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500..=599)
}
