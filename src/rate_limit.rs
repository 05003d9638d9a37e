//! Fixed-window, per-client rate limiting.
//!
//! The limiter is an explicitly constructed value owned by the application
//! state. Entries expire at the end of their window; `sweep` drops expired
//! entries and is run periodically by the scheduler.

use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Key used when no client address header is present.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(60))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count one request from `key` against its window.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let max = self.config.max_requests;

        if let Some(entry) = entries.get_mut(key) {
            if now < entry.reset_at {
                if entry.count >= max {
                    debug!("Rate limit hit for {}", key);
                    return RateLimitDecision::Limited {
                        retry_after: entry.reset_at - now,
                    };
                }
                entry.count += 1;
                return RateLimitDecision::Allowed {
                    remaining: max - entry.count,
                };
            }
        }

        if max == 0 {
            return RateLimitDecision::Limited {
                retry_after: self.config.window,
            };
        }

        // First request, or the previous window has expired
        entries.insert(
            key.to_string(),
            WindowEntry {
                count: 1,
                reset_at: now + self.config.window,
            },
        );
        RateLimitDecision::Allowed { remaining: max - 1 }
    }

    /// Drop expired windows. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let before = entries.len();
        entries.retain(|_, entry| now < entry.reset_at);
        before - entries.len()
    }

    /// Number of tracked clients.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identify the client: first `X-Forwarded-For` hop, then `X-Real-IP`.
pub fn client_key(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .unwrap_or(ANONYMOUS_CLIENT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use std::sync::Arc;

    fn limiter(max: u32, window_secs: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig::new(max, Duration::from_secs(window_secs)))
    }

    // ==================== check Tests ====================

    #[test]
    fn test_allows_up_to_max() {
        let limiter = limiter(3, 60);
        let now = Instant::now();
        assert_eq!(limiter.check_at("a", now), RateLimitDecision::Allowed { remaining: 2 });
        assert_eq!(limiter.check_at("a", now), RateLimitDecision::Allowed { remaining: 1 });
        assert_eq!(limiter.check_at("a", now), RateLimitDecision::Allowed { remaining: 0 });
        assert!(!limiter.check_at("a", now).is_allowed());
    }

    #[test]
    fn test_limited_reports_time_until_reset() {
        let limiter = limiter(1, 60);
        let start = Instant::now();
        limiter.check_at("a", start);

        let later = start + Duration::from_secs(20);
        assert_eq!(
            limiter.check_at("a", later),
            RateLimitDecision::Limited {
                retry_after: Duration::from_secs(40)
            }
        );
    }

    #[test]
    fn test_window_resets() {
        let limiter = limiter(1, 60);
        let start = Instant::now();
        limiter.check_at("a", start);
        assert!(!limiter.check_at("a", start + Duration::from_secs(59)).is_allowed());
        assert_eq!(
            limiter.check_at("a", start + Duration::from_secs(60)),
            RateLimitDecision::Allowed { remaining: 0 }
        );
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = limiter(1, 60);
        let now = Instant::now();
        assert!(limiter.check_at("a", now).is_allowed());
        assert!(limiter.check_at("b", now).is_allowed());
        assert!(!limiter.check_at("a", now).is_allowed());
    }

    #[test]
    fn test_zero_max_always_limits() {
        let limiter = limiter(0, 60);
        assert!(!limiter.check("a").is_allowed());
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 5);
        assert_eq!(config.window, Duration::from_secs(60));
    }

    // ==================== sweep Tests ====================

    #[test]
    fn test_sweep_removes_only_expired() {
        let limiter = limiter(5, 60);
        let start = Instant::now();
        limiter.check_at("old", start);
        limiter.check_at("new", start + Duration::from_secs(30));

        assert_eq!(limiter.sweep_at(start + Duration::from_secs(61)), 1);
        assert_eq!(limiter.len(), 1);
        assert_eq!(limiter.sweep_at(start + Duration::from_secs(91)), 1);
        assert!(limiter.is_empty());
    }

    // ==================== Concurrency Tests ====================

    #[test]
    fn test_concurrent_checks_never_exceed_max() {
        let limiter = Arc::new(limiter(50, 60));
        let now = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    (0..20)
                        .filter(|_| limiter.check_at("shared", now).is_allowed())
                        .count()
                })
            })
            .collect();

        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 50);
    }

    // ==================== client_key Tests ====================

    #[test]
    fn test_client_key_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_key_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(client_key(&headers), "198.51.100.4");
    }

    #[test]
    fn test_client_key_anonymous() {
        assert_eq!(client_key(&HeaderMap::new()), ANONYMOUS_CLIENT);
    }
}
