//! Minimum-spacing rate limiter for backend calls
//!
//! Guarantees at least `min_interval` between the starts of consecutive
//! calls. This is not a token bucket: there is no burst allowance.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_MIN_CALL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a call is permitted, then record now as the last call time.
    ///
    /// The lock is held across the wait, so concurrent callers queue up and
    /// each observes the timestamp written by the one before it.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(last) = *last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate limiting backend call");
                tokio::time::sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_CALL_INTERVAL)
    }
}
