//! Async runtime helpers.
//!
//! Every device call goes through [`timeout`], which is the only cancellation
//! mechanism this crate uses: one call timing out never cancels another.

use std::future::Future;
use std::time::Duration;

/// Sleep for the specified duration.
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Run a future with a timeout.
///
/// Returns `Err(TimedOut)` if the timeout expires before the future completes.
pub async fn timeout<F, T>(duration: Duration, future: F) -> Result<T, TimedOut>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| TimedOut(duration))
}

/// Error returned when a timeout expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut(pub Duration);

impl std::fmt::Display for TimedOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timed out after {}ms", self.0.as_millis())
    }
}

impl std::error::Error for TimedOut {}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_time_out_slow_futures() {
        let err = timeout(Duration::from_secs(1), sleep(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "timed out after 1000ms");
    }

    #[tokio::test]
    async fn test_pass_fast_futures_through() {
        assert_eq!(timeout(Duration::from_secs(1), async { 7 }).await, Ok(7));
    }
}
