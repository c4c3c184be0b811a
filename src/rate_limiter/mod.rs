use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Spaces out requests to prevent API throttling.
/// Shared by concurrent callers: each `wait` claims the next free slot.
pub struct RateLimiter {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: Mutex::new(None),
        }
    }

    pub async fn wait(&self) {
        if self.is_disabled() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            sleep_until(previous + self.delay).await;
        }
        *last = Some(Instant::now());
    }

    fn is_disabled(&self) -> bool {
        self.delay.is_zero()
    }
}
