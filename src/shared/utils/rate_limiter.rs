use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Minimum-interval rate limiter shared by all requests to one remote API.
///
/// Jikan enforces a per-second request budget; spacing requests out is enough
/// for a browsing session, so there is no burst accounting here.
pub struct RateLimiter {
    last_request: Arc<Mutex<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second);
        Self {
            last_request: Arc::new(Mutex::new(Instant::now() - min_interval)),
            min_interval,
        }
    }

    /// Suspend until the next request slot is available.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        let now = Instant::now();
        let elapsed = now.duration_since(*last);

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_interval_derived_from_rate() {
        let limiter = RateLimiter::new(3.0);
        assert_eq!(limiter.min_interval(), Duration::from_secs_f64(1.0 / 3.0));
    }

    #[test]
    fn test_first_wait_does_not_block() {
        tokio_test::block_on(async {
            let limiter = RateLimiter::new(1.0);
            let start = Instant::now();
            limiter.wait().await;
            assert!(start.elapsed() < Duration::from_millis(100));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_waits_are_spaced() {
        let limiter = RateLimiter::new(2.0);
        limiter.wait().await;

        let before = Instant::now();
        limiter.wait().await;
        assert!(before.elapsed() >= Duration::from_millis(500));
    }
}
