use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

/// Tracks per-IP news request counts in fixed windows.
#[derive(Clone)]
pub struct RateLimiter {
    /// IP address -> (count, window_start)
    ip_window: Arc<DashMap<String, (u32, DateTime<Utc>)>>,
    pub max_requests_per_window: u32,
    pub window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests_per_window: u32, window_secs: i64) -> Self {
        Self {
            ip_window: Arc::new(DashMap::new()),
            max_requests_per_window,
            window: Duration::seconds(window_secs),
        }
    }

    /// Check if an IP address has exceeded the per-window request limit.
    /// Returns Ok(current_count) or Err(message) if over limit.
    pub fn check_ip_limit(&self, ip: &str) -> Result<u32, String> {
        self.check_ip_limit_at(ip, Utc::now())
    }

    pub fn check_ip_limit_at(&self, ip: &str, now: DateTime<Utc>) -> Result<u32, String> {
        let mut entry = self.ip_window.entry(ip.to_string()).or_insert((0, now));

        // Window resets once it has run its full length since the first request
        if now - entry.1 >= self.window {
            entry.0 = 0;
            entry.1 = now;
        }

        if entry.0 >= self.max_requests_per_window {
            return Err(format!(
                "IP has exceeded rate limit of {} requests per {} minutes",
                self.max_requests_per_window,
                self.window.num_minutes()
            ));
        }

        entry.0 += 1;
        Ok(entry.0)
    }

    /// Requests counted for `ip` in its current window.
    pub fn count(&self, ip: &str) -> u32 {
        self.ip_window.get(ip).map_or(0, |e| e.0)
    }

    /// Drop windows that have fully elapsed. Call this from a background task.
    pub fn cleanup_stale_entries(&self) -> usize {
        self.cleanup_stale_entries_at(Utc::now())
    }

    pub fn cleanup_stale_entries_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.ip_window.len();
        self.ip_window
            .retain(|_, (_, window_start)| now - *window_start < self.window);
        before - self.ip_window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_limit() {
        let limiter = RateLimiter::new(3, 3600);

        assert!(limiter.check_ip_limit("1.2.3.4").is_ok());
        assert!(limiter.check_ip_limit("1.2.3.4").is_ok());
        assert_eq!(limiter.check_ip_limit("1.2.3.4"), Ok(3));
        // Fourth should fail
        assert!(limiter.check_ip_limit("1.2.3.4").is_err());
        assert_eq!(limiter.count("1.2.3.4"), 3);

        // Different IP is fine
        assert!(limiter.check_ip_limit("5.6.7.8").is_ok());
    }

    #[test]
    fn test_window_resets_after_elapsed_time() {
        let limiter = RateLimiter::new(1, 3600);
        let t0 = Utc::now();

        assert!(limiter.check_ip_limit_at("ip", t0).is_ok());
        assert!(limiter
            .check_ip_limit_at("ip", t0 + Duration::seconds(3599))
            .is_err());
        assert_eq!(
            limiter.check_ip_limit_at("ip", t0 + Duration::seconds(3600)),
            Ok(1)
        );
    }

    #[test]
    fn test_cleanup_stale_entries() {
        let limiter = RateLimiter::new(10, 60);
        let t0 = Utc::now();
        limiter.check_ip_limit_at("old", t0).unwrap();
        limiter
            .check_ip_limit_at("new", t0 + Duration::seconds(30))
            .unwrap();

        assert_eq!(limiter.cleanup_stale_entries_at(t0 + Duration::seconds(61)), 1);
        assert_eq!(limiter.count("old"), 0);
        assert_eq!(limiter.count("new"), 1);
    }
}
