use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// Sliding-window rate limiter keyed by session id.
///
/// Each session gets its own window of recent message timestamps; a message
/// is allowed while the window holds fewer than `limit` entries. Sessions
/// that go quiet are pruned so the map does not grow with dead sessions.
pub struct RateLimiter {
    /// Recent message timestamps per session, oldest first.
    windows: HashMap<String, VecDeque<Instant>>,
    /// Messages allowed per session within `window`.
    limit: usize,
    /// The duration of the sliding window.
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            windows: HashMap::new(),
            limit,
            window,
        }
    }

    /// Records a message attempt for `session_id` and reports whether it is
    /// allowed. Expired timestamps are dropped before the count is checked.
    pub fn check(&mut self, session_id: &str) -> bool {
        let now = Instant::now();
        let window_start = now - self.window;

        let timestamps = self.windows.entry(session_id.to_string()).or_default();
        while timestamps.front().is_some_and(|&t| t <= window_start) {
            timestamps.pop_front();
        }

        if timestamps.len() < self.limit {
            timestamps.push_back(now);
            true
        } else {
            false
        }
    }

    /// Forgets a session entirely, e.g. when it is deleted.
    pub fn forget(&mut self, session_id: &str) {
        self.windows.remove(session_id);
    }

    /// Drops sessions whose entire window has expired.
    pub fn prune(&mut self) {
        let window_start = Instant::now() - self.window;
        self.windows
            .retain(|_, timestamps| timestamps.iter().any(|&t| t > window_start));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_allows_messages_within_limit() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(1));
        for _ in 0..5 {
            assert!(limiter.check("session-a"));
        }
        assert!(!limiter.check("session-a"));
    }

    #[test]
    fn test_sessions_are_limited_independently() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        assert!(limiter.check("session-a"));
        assert!(!limiter.check("session-a"));
        assert!(limiter.check("session-b"));
    }

    #[test]
    fn test_window_slides() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(50));
        assert!(limiter.check("session-a"));
        assert!(limiter.check("session-a"));
        assert!(!limiter.check("session-a"));

        thread::sleep(Duration::from_millis(60));

        assert!(limiter.check("session-a"));
    }

    #[test]
    fn test_forget_clears_a_session() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("session-a"));
        assert!(!limiter.check("session-a"));
        limiter.forget("session-a");
        assert!(limiter.check("session-a"));
    }

    #[test]
    fn test_prune_drops_expired_sessions() {
        let mut limiter = RateLimiter::new(2, Duration::from_millis(10));
        assert!(limiter.check("session-a"));
        thread::sleep(Duration::from_millis(20));
        limiter.prune();
        assert!(limiter.windows.is_empty());
    }
}
