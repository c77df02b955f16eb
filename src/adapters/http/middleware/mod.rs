//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `rate_limit` - Per-IP request throttling
//! - `security_headers` - Browser hardening headers

pub mod rate_limit;
pub mod security_headers;

pub use rate_limit::{analyze_rate_limit, general_rate_limit, RateLimiterState};
pub use security_headers::security_headers;
