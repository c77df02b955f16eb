//! HTTP handlers for the marketplace API.
//!
//! Handlers connect axum routes to the analysis pipeline. Internal failure
//! detail is logged server-side; clients only ever see the stable error
//! envelope.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{AnalysisError, ScenarioAnalyzer};
use crate::domain::catalog::{AiTool, Catalog};

use super::dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, HealthResponse};

/// API error that implements IntoResponse.
pub enum ApiError {
    BadRequest(String),
    Timeout,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::validation(msg)),
            ApiError::Timeout => (StatusCode::REQUEST_TIMEOUT, ErrorResponse::timeout()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::analysis_failed(),
            ),
        };
        (status, Json(error)).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::Validation(msg) => ApiError::BadRequest(msg),
            AnalysisError::Timeout => {
                tracing::error!("scenario analysis timed out");
                ApiError::Timeout
            }
            AnalysisError::Provider(err) => {
                tracing::error!(error = %err, "scenario analysis failed");
                ApiError::Internal
            }
        }
    }
}

/// Shared application state for the API.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ScenarioAnalyzer>,
}

/// GET /api/health
///
/// Liveness check; no external calls.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// GET /api/ais
///
/// Returns the full tool catalog.
pub async fn list_ais() -> Json<&'static [AiTool]> {
    Json(Catalog::shared().tools())
}

/// POST /api/analyze
///
/// Runs the recommendation pipeline on the submitted scenario.
pub async fn analyze_scenario(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let features = payload.features();

    let result = state
        .analyzer
        .analyze(
            payload.scenario().unwrap_or_default(),
            payload.use_case(),
            payload.budget(),
            &features,
        )
        .await?;

    Ok(Json(AnalyzeResponse::from(result)))
}

/// Fallback for unknown routes.
pub async fn route_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::not_found()))
}
