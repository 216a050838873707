//! Fixed-interval request gate shared by every outbound call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Rate limiter to enforce request intervals.
///
/// Each [`RateLimiter::acquire`] waits until `min_interval` has passed since
/// the previous admitted call started. A zero interval disables waiting.
#[derive(Debug)]
pub struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
    admitted: AtomicU64,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self { last_request: Mutex::new(None), min_interval, admitted: AtomicU64::new(0) }
    }

    /// Acquire permission to make a request, waiting if necessary.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                tracing::debug!(wait_ms = wait.as_millis() as u64, "rate limiter delaying request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of requests admitted so far.
    pub fn request_count(&self) -> u64 {
        self.admitted.load(Ordering::Relaxed)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.request_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_calls_are_spaced() {
        let limiter = RateLimiter::new(Duration::from_millis(1000));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(limiter.request_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_elapsed() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        limiter.acquire().await;
        tokio::time::sleep(Duration::from_millis(600)).await;

        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_waits() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.request_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_gate() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_millis(1000)));
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = limiter.clone();
                tokio::spawn(async move { limiter.acquire().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(limiter.request_count(), 3);
    }
}
