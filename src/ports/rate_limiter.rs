//! Rate limiting port for protecting the API and the LLM budget.
//!
//! Limits are keyed per client IP, with an optional resource component for
//! endpoint-specific limits (the analyze endpoint is stricter than general
//! traffic). Implementations use a fixed-window counter.

use async_trait::async_trait;

/// Port for rate limiting operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Check if a request is allowed, consuming a slot if so.
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError>;

    /// Get current status without consuming a slot.
    ///
    /// Operational surface: the request path gets its status from `check`;
    /// this exists for quota inspection without spending a slot.
    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError>;

    /// Reset the window for a key, restoring full quota.
    ///
    /// Operational surface for unblocking a client by hand.
    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError>;
}

/// Key identifying what to rate limit: a client IP, optionally narrowed to a
/// specific resource.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RateLimitKey {
    /// Client IP address.
    pub ip: String,
    /// Optional resource for endpoint-specific limits (e.g. "analyze").
    pub resource: Option<String>,
}

impl RateLimitKey {
    /// Creates a general per-IP key.
    pub fn ip(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            resource: None,
        }
    }

    /// Creates a per-IP key narrowed to a resource.
    pub fn ip_resource(ip: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            resource: Some(resource.into()),
        }
    }

    /// Returns the storage key string for this rate limit key.
    pub fn cache_key(&self) -> String {
        match &self.resource {
            Some(resource) => format!("ratelimit:ip:{}:{}", self.ip, resource),
            None => format!("ratelimit:ip:{}", self.ip),
        }
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub enum RateLimitResult {
    /// Request is allowed; includes current status.
    Allowed(RateLimitStatus),
    /// Request is denied; includes denial details.
    Denied(RateLimitDenied),
}

impl RateLimitResult {
    /// Returns true if the request was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed(_))
    }

    /// Returns true if the request was denied.
    pub fn is_denied(&self) -> bool {
        matches!(self, RateLimitResult::Denied(_))
    }
}

/// Current rate limit status.
#[derive(Debug, Clone)]
pub struct RateLimitStatus {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Remaining requests in the current window.
    pub remaining: u32,
    /// Unix timestamp when the current window resets.
    pub reset_at: u64,
    /// Window duration in seconds.
    pub window_secs: u32,
}

/// Details of a rate limit denial.
#[derive(Debug, Clone)]
pub struct RateLimitDenied {
    /// Maximum requests allowed in the window.
    pub limit: u32,
    /// Seconds until the client should retry.
    pub retry_after_secs: u32,
    /// Human-readable message explaining the denial.
    pub message: String,
}

/// Errors that can occur during rate limiting operations.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    /// Rate limiter backend is unavailable.
    #[error("rate limiter unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_key_has_no_resource() {
        let key = RateLimitKey::ip("192.168.1.1");
        assert_eq!(key.ip, "192.168.1.1");
        assert!(key.resource.is_none());
    }

    #[test]
    fn resource_key_includes_resource() {
        let key = RateLimitKey::ip_resource("192.168.1.1", "analyze");
        assert_eq!(key.resource.as_deref(), Some("analyze"));
    }

    #[test]
    fn cache_key_format_without_resource() {
        assert_eq!(RateLimitKey::ip("10.0.0.1").cache_key(), "ratelimit:ip:10.0.0.1");
    }

    #[test]
    fn cache_key_format_with_resource() {
        assert_eq!(
            RateLimitKey::ip_resource("10.0.0.1", "analyze").cache_key(),
            "ratelimit:ip:10.0.0.1:analyze"
        );
    }

    #[test]
    fn result_predicates_work() {
        let status = RateLimitStatus {
            limit: 100,
            remaining: 50,
            reset_at: 0,
            window_secs: 900,
        };
        assert!(RateLimitResult::Allowed(status).is_allowed());

        let denied = RateLimitDenied {
            limit: 100,
            retry_after_secs: 30,
            message: "Too many requests".to_string(),
        };
        assert!(RateLimitResult::Denied(denied).is_denied());
    }
}
