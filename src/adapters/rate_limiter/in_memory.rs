//! In-memory rate limiter.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! Single-process only; counters are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::config::RateLimitSettings;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

/// In-memory fixed-window rate limiter, keyed by client IP and optional
/// resource name.
///
/// Each window tracks the count of requests and resets when the window
/// expires. Keys with a resource of `"analyze"` use the analysis cap;
/// everything else uses the general cap.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    /// Rate limit settings.
    settings: RateLimitSettings,
    /// Per-key window state.
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    /// Number of requests in the current window.
    count: u32,
    /// When the current window started.
    window_start: u64,
}

impl InMemoryRateLimiter {
    /// Create a new in-memory rate limiter.
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            settings,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a rate limiter with default settings.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitSettings::default())
    }

    /// Get the request cap for a key.
    fn limit_for(&self, key: &RateLimitKey) -> u32 {
        match key.resource.as_deref() {
            Some("analyze") => self.settings.analyze_max,
            _ => self.settings.general_max,
        }
    }

    /// Get current timestamp as unix seconds.
    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let cache_key = key.cache_key();
        let limit = self.limit_for(&key);
        let window_secs = self.settings.window_secs;
        let now = Self::now_secs();

        let mut windows = self.windows.write().await;

        let state = windows.entry(cache_key).or_insert_with(|| WindowState {
            count: 0,
            window_start: now,
        });

        // Reset expired windows
        let window_end = state.window_start + window_secs as u64;
        if now >= window_end {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= limit {
            let retry_after =
                (state.window_start + window_secs as u64).saturating_sub(now) as u32;

            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
                message: format!("Rate limit exceeded. Retry after {} seconds.", retry_after),
            }));
        }

        state.count += 1;
        let remaining = limit.saturating_sub(state.count);
        let reset_at = state.window_start + window_secs as u64;

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining,
            reset_at,
            window_secs,
        }))
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let cache_key = key.cache_key();
        let limit = self.limit_for(&key);
        let window_secs = self.settings.window_secs;
        let now = Self::now_secs();

        let windows = self.windows.read().await;

        let (count, window_start) = windows
            .get(&cache_key)
            .map(|state| {
                let window_end = state.window_start + window_secs as u64;
                if now >= window_end {
                    (0, now) // Window expired
                } else {
                    (state.count, state.window_start)
                }
            })
            .unwrap_or((0, now));

        let remaining = limit.saturating_sub(count);
        let reset_at = window_start + window_secs as u64;

        Ok(RateLimitStatus {
            limit,
            remaining,
            reset_at,
            window_secs,
        })
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        let cache_key = key.cache_key();
        let mut windows = self.windows.write().await;
        windows.remove(&cache_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings(general_max: u32, analyze_max: u32) -> RateLimitSettings {
        RateLimitSettings {
            window_secs: 900,
            general_max,
            analyze_max,
        }
    }

    #[tokio::test]
    async fn allows_requests_within_limit() {
        let limiter = InMemoryRateLimiter::with_defaults();
        let key = RateLimitKey::ip("192.168.1.1");

        for i in 0..10 {
            let result = limiter.check(key.clone()).await.unwrap();
            assert!(result.is_allowed(), "Request {} should be allowed", i + 1);
        }
    }

    #[tokio::test]
    async fn denies_requests_at_limit() {
        let limiter = InMemoryRateLimiter::new(small_settings(5, 5));
        let key = RateLimitKey::ip("192.168.1.1");

        for _ in 0..5 {
            let result = limiter.check(key.clone()).await.unwrap();
            assert!(result.is_allowed());
        }

        let result = limiter.check(key.clone()).await.unwrap();
        assert!(result.is_denied());

        if let RateLimitResult::Denied(denied) = result {
            assert_eq!(denied.limit, 5);
            assert!(denied.retry_after_secs > 0);
        }
    }

    #[tokio::test]
    async fn analyze_resource_uses_stricter_cap() {
        let limiter = InMemoryRateLimiter::new(small_settings(100, 2));
        let key = RateLimitKey::ip_resource("10.0.0.1", "analyze");

        for _ in 0..2 {
            let result = limiter.check(key.clone()).await.unwrap();
            assert!(result.is_allowed());
        }

        let result = limiter.check(key.clone()).await.unwrap();
        assert!(result.is_denied());
    }

    #[tokio::test]
    async fn resource_and_general_counters_are_independent() {
        let limiter = InMemoryRateLimiter::new(small_settings(3, 3));
        let general = RateLimitKey::ip("10.0.0.1");
        let analyze = RateLimitKey::ip_resource("10.0.0.1", "analyze");

        for _ in 0..3 {
            limiter.check(general.clone()).await.unwrap();
        }
        assert!(limiter.check(general.clone()).await.unwrap().is_denied());

        // Same IP, separate analyze window
        assert!(limiter.check(analyze.clone()).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn status_returns_remaining_count() {
        let limiter = InMemoryRateLimiter::new(small_settings(10, 10));
        let key = RateLimitKey::ip("10.0.0.1");

        let status = limiter.status(key.clone()).await.unwrap();
        assert_eq!(status.limit, 10);
        assert_eq!(status.remaining, 10);

        for _ in 0..3 {
            limiter.check(key.clone()).await.unwrap();
        }

        let status = limiter.status(key.clone()).await.unwrap();
        assert_eq!(status.remaining, 7);
    }

    #[tokio::test]
    async fn reset_clears_counter() {
        let limiter = InMemoryRateLimiter::new(small_settings(5, 5));
        let key = RateLimitKey::ip("10.0.0.2");

        for _ in 0..5 {
            limiter.check(key.clone()).await.unwrap();
        }
        assert!(limiter.check(key.clone()).await.unwrap().is_denied());

        limiter.reset(key.clone()).await.unwrap();

        assert!(limiter.check(key.clone()).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn different_ips_have_independent_limits() {
        let limiter = InMemoryRateLimiter::new(small_settings(3, 3));
        let key1 = RateLimitKey::ip("1.1.1.1");
        let key2 = RateLimitKey::ip("2.2.2.2");

        for _ in 0..3 {
            limiter.check(key1.clone()).await.unwrap();
        }
        assert!(limiter.check(key1.clone()).await.unwrap().is_denied());

        // key2 still has its full limit
        assert!(limiter.check(key2.clone()).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn remaining_decrements_correctly() {
        let limiter = InMemoryRateLimiter::new(small_settings(10, 10));
        let key = RateLimitKey::ip("test-ip");

        for expected_remaining in (0..10).rev() {
            let result = limiter.check(key.clone()).await.unwrap();
            if let RateLimitResult::Allowed(status) = result {
                assert_eq!(
                    status.remaining, expected_remaining as u32,
                    "After request, remaining should be {}",
                    expected_remaining
                );
            }
        }
    }
}
