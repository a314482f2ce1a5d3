use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Fixed-window limiter: at most `max_calls` per `period`, callers beyond the
/// quota sleep until the window rolls over
#[derive(Debug)]
pub struct RateLimiter {
    max_calls: u32,
    period: Duration,
    window: Mutex<Window>,
}

#[derive(Debug)]
struct Window {
    started_at: Instant,
    calls: u32,
}

impl RateLimiter {
    /// Create a limiter allowing `max_calls` (at least one) per `period`
    pub fn new(max_calls: u32, period: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            period,
            window: Mutex::new(Window {
                started_at: Instant::now(),
                calls: 0,
            }),
        }
    }

    /// Limiter allowing `calls` per second
    pub fn per_second(calls: u32) -> Self {
        Self::new(calls, Duration::from_secs(1))
    }

    /// Wait until another call is allowed and count it
    pub async fn acquire(&self) {
        let mut window = self.window.lock().await;
        let elapsed = window.started_at.elapsed();

        if elapsed >= self.period {
            window.started_at = Instant::now();
            window.calls = 0;
        } else if window.calls >= self.max_calls {
            let wait = self.period - elapsed;
            debug!("Rate limit of {} calls reached, sleeping {:?}", self.max_calls, wait);
            sleep(wait).await;

            window.started_at = Instant::now();
            window.calls = 0;
        }

        window.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_calls_within_quota_do_not_wait() {
        let limiter = RateLimiter::per_second(5);
        let start = Instant::now();

        for _ in 0..5 {
            limiter.acquire().await;
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_beyond_quota_sleeps_until_next_window() {
        let limiter = RateLimiter::per_second(2);
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;

        assert!(start.elapsed() >= Duration::from_secs(1));

        // Second window has room for one more call without waiting
        let second_window = Instant::now();
        limiter.acquire().await;
        assert_eq!(second_window.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_quota_still_allows_one_call() {
        let limiter = RateLimiter::per_second(0);
        let start = Instant::now();

        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
