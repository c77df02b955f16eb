//! HTTP adapter - REST API for the marketplace.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export key types for convenience
pub use handlers::AppState;
pub use routes::api_router;
