//! Rate limiter adapters.
//!
//! Implementations of the `RateLimiter` port.
//!
//! - `InMemoryRateLimiter` - Fixed-window counters for a single-process server

mod in_memory;

pub use in_memory::InMemoryRateLimiter;
