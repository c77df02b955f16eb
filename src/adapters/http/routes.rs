//! Router assembly for the marketplace API.

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{InvalidHeaderValue, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{analyze_scenario, health_check, list_ais, route_not_found, AppState};
use super::middleware::{analyze_rate_limit, general_rate_limit, security_headers, RateLimiterState};

/// JSON bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 10 * 1024;

/// Browser preflight cache duration.
const CORS_MAX_AGE: Duration = Duration::from_secs(86400);

/// Builds the full API router.
///
/// Layer order matters: the body limit and CORS wrap everything, rate
/// limiting runs before handlers, and the analysis endpoint carries its own
/// stricter limit on top of the general one.
///
/// # Errors
///
/// Returns an error if `cors_origin` is not a valid header value.
pub fn api_router(
    state: AppState,
    limiter: RateLimiterState,
    cors_origin: &str,
) -> Result<Router, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE);

    let analyze_routes = Router::new()
        .route("/api/analyze", post(analyze_scenario))
        .route_layer(middleware::from_fn_with_state(
            limiter.clone(),
            analyze_rate_limit,
        ));

    let router = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/ais", get(list_ais))
        .merge(analyze_routes)
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(limiter, general_rate_limit))
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiProvider;
    use crate::adapters::rate_limiter::InMemoryRateLimiter;
    use crate::application::ScenarioAnalyzer;
    use crate::config::AiConfig;
    use std::sync::Arc;

    #[test]
    fn router_builds_with_valid_origin() {
        let state = AppState {
            analyzer: Arc::new(ScenarioAnalyzer::new(
                Arc::new(MockAiProvider::new()),
                AiConfig::default(),
            )),
        };
        let limiter: RateLimiterState = Arc::new(InMemoryRateLimiter::with_defaults());

        let result = api_router(state, limiter, "http://localhost:5173");
        assert!(result.is_ok());
    }

    #[test]
    fn router_rejects_invalid_origin() {
        let state = AppState {
            analyzer: Arc::new(ScenarioAnalyzer::new(
                Arc::new(MockAiProvider::new()),
                AiConfig::default(),
            )),
        };
        let limiter: RateLimiterState = Arc::new(InMemoryRateLimiter::with_defaults());

        let result = api_router(state, limiter, "not\na\nheader");
        assert!(result.is_err());
    }
}
