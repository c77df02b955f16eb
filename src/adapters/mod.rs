//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM completion providers (Groq, mock)
//! - `http` - REST API surface
//! - `rate_limiter` - Request throttling backends

pub mod ai;
pub mod http;
pub mod rate_limiter;
