//! Rate limiting middleware for axum.
//!
//! Enforces per-IP limits through the `RateLimiter` port. Two layers exist:
//!
//! - `general_rate_limit` applies to every `/api` route except the health
//!   check, keyed by client IP.
//! - `analyze_rate_limit` applies only to the analysis endpoint, with its own
//!   stricter window counted separately from general traffic.
//!
//! Rate limit status is returned in standard HTTP headers:
//! - `X-RateLimit-Limit`: Maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: Requests remaining in the current window
//! - `X-RateLimit-Reset`: Unix timestamp when the window resets
//! - `Retry-After`: Seconds to wait (only on 429 response)
//!
//! If the limiter itself fails, requests pass through and a warning is
//! logged. Throttling is protection, not a correctness requirement.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::ports::{RateLimitKey, RateLimitResult, RateLimiter};

/// Rate limiter middleware state.
pub type RateLimiterState = Arc<dyn RateLimiter>;

/// Resource name for the analysis endpoint's dedicated window.
pub const ANALYZE_RESOURCE: &str = "analyze";

/// 429 body for general traffic.
pub const GENERAL_LIMIT_MESSAGE: &str =
    "Too many requests from this IP, please try again later.";

/// 429 body for the analysis endpoint.
pub const ANALYZE_LIMIT_MESSAGE: &str =
    "Too many analysis requests. Please wait before trying again.";

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    /// Maximum requests allowed in the window.
    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    /// Requests remaining in the current window.
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    /// Unix timestamp when the window resets.
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// General per-IP rate limiting across the API.
///
/// The health check is exempt so deployment probes never consume quota.
pub async fn general_rate_limit(
    State(limiter): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == "/api/health" {
        return next.run(request).await;
    }

    let Some(ip) = extract_client_ip(&request, connect_info.as_ref()) else {
        // No attributable client; let it through rather than throttle blind
        return next.run(request).await;
    };

    let status = match limiter.check(RateLimitKey::ip(&ip)).await {
        Ok(RateLimitResult::Denied(denied)) => {
            return rate_limit_response(
                GENERAL_LIMIT_MESSAGE,
                denied.limit,
                denied.retry_after_secs,
            );
        }
        Ok(RateLimitResult::Allowed(status)) => Some(status),
        Err(e) => {
            tracing::warn!("Rate limiter unavailable: {}", e);
            // Fail open for availability
            None
        }
    };

    let mut response = next.run(request).await;
    if let Some(status) = status {
        add_rate_limit_headers(&mut response, status.limit, status.remaining, status.reset_at);
    }
    response
}

/// Stricter rate limiting for the analysis endpoint.
///
/// Counts against a separate window from general traffic, so a client that
/// exhausts the analysis quota can still browse the catalog.
pub async fn analyze_rate_limit(
    State(limiter): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(ip) = extract_client_ip(&request, connect_info.as_ref()) else {
        return next.run(request).await;
    };

    match limiter
        .check(RateLimitKey::ip_resource(&ip, ANALYZE_RESOURCE))
        .await
    {
        Ok(RateLimitResult::Denied(denied)) => rate_limit_response(
            ANALYZE_LIMIT_MESSAGE,
            denied.limit,
            denied.retry_after_secs,
        ),
        Ok(RateLimitResult::Allowed(status)) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(
                &mut response,
                status.limit,
                status.remaining,
                status.reset_at,
            );
            response
        }
        Err(e) => {
            tracing::warn!("Rate limiter unavailable for analysis check: {}", e);
            next.run(request).await
        }
    }
}

/// Extract client IP from request, checking forwarded headers first.
///
/// Order of precedence:
/// 1. X-Forwarded-For header (first IP in list)
/// 2. X-Real-IP header
/// 3. ConnectInfo socket address
fn extract_client_ip<B>(
    request: &axum::http::Request<B>,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        // Take the first IP (client IP, before any proxies)
        if let Some(first_ip) = forwarded.split(',').next() {
            return Some(first_ip.trim().to_string());
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return Some(real_ip.to_string());
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

/// Create a 429 Too Many Requests response with a plain-text body.
fn rate_limit_response(message: &'static str, limit: u32, retry_after_secs: u32) -> Response {
    let mut response = (StatusCode::TOO_MANY_REQUESTS, message).into_response();

    let headers = response.headers_mut();
    headers.insert(
        headers::X_RATELIMIT_LIMIT.clone(),
        HeaderValue::from_str(&limit.to_string()).unwrap_or(HeaderValue::from_static("0")),
    );
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from_static("0"),
    );
    headers.insert(
        "Retry-After",
        HeaderValue::from_str(&retry_after_secs.to_string())
            .unwrap_or(HeaderValue::from_static("1")),
    );

    response
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(response: &mut Response, limit: u32, remaining: u32, reset_at: u64) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
        headers.insert(headers::X_RATELIMIT_LIMIT.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&remaining.to_string()) {
        headers.insert(headers::X_RATELIMIT_REMAINING.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&reset_at.to_string()) {
        headers.insert(headers::X_RATELIMIT_RESET.clone(), value);
    }
}
