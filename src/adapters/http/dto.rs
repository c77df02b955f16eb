//! HTTP DTOs for the marketplace API.
//!
//! Catalog entries serialize directly from the domain type, so only the
//! analyze request/response and the error envelope live here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::analysis::AnalysisResult;
use crate::domain::catalog::AiTool;

/// Request body for `POST /api/analyze`.
///
/// Fields deserialize as raw JSON values so wrong-typed input never fails
/// extraction: a non-string scenario counts as missing (and becomes a
/// validation error downstream), non-string `features` entries are dropped,
/// and a non-array `features` counts as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    pub scenario: Option<Value>,
    pub use_case: Option<Value>,
    pub budget: Option<Value>,
    pub features: Option<Value>,
}

impl AnalyzeRequest {
    /// The scenario, if it was sent as a string.
    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_ref().and_then(Value::as_str)
    }

    /// The use case, if it was sent as a string.
    pub fn use_case(&self) -> Option<&str> {
        self.use_case.as_ref().and_then(Value::as_str)
    }

    /// The budget, if it was sent as a string.
    pub fn budget(&self) -> Option<&str> {
        self.budget.as_ref().and_then(Value::as_str)
    }

    /// String entries of `features`, with everything else removed.
    pub fn features(&self) -> Vec<String> {
        match &self.features {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Response body for `POST /api/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub scenario: String,
    #[serde(rename = "recommendedAIs")]
    pub recommended_ais: Vec<AiTool>,
    pub explanation: String,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            scenario: result.scenario,
            recommended_ais: result.recommended_ais,
            explanation: result.explanation,
        }
    }
}

/// Response body for `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "AI Marketplace API is running".to_string(),
        }
    }
}

/// Standard error response.
///
/// Validation failures carry a `message`; pipeline failures carry a stable
/// `code` clients can branch on.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            error: "Validation error".to_string(),
            message: Some(message.into()),
            code: None,
        }
    }

    pub fn timeout() -> Self {
        Self {
            error: "Request timeout - analysis took too long".to_string(),
            message: None,
            code: Some("TIMEOUT".to_string()),
        }
    }

    pub fn analysis_failed() -> Self {
        Self {
            error: "Failed to analyze scenario".to_string(),
            message: None,
            code: Some("ANALYSIS_ERROR".to_string()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            error: "Route not found".to_string(),
            message: None,
            code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_request_accepts_camel_case_fields() {
        let body = r#"{
            "scenario": "I need help writing blog posts",
            "useCase": "Writing",
            "budget": "$20/month",
            "features": ["SEO", "Templates"]
        }"#;
        let request: AnalyzeRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.scenario(), Some("I need help writing blog posts"));
        assert_eq!(request.use_case(), Some("Writing"));
        assert_eq!(request.budget(), Some("$20/month"));
        assert_eq!(request.features(), vec!["SEO", "Templates"]);
    }

    #[test]
    fn analyze_request_tolerates_missing_fields() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.scenario().is_none());
        assert!(request.features().is_empty());
    }

    #[test]
    fn non_string_feature_entries_are_removed() {
        let body = r#"{"scenario": "x", "features": ["Speed", 5, null, {"a": 1}, "Quality"]}"#;
        let request: AnalyzeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.features(), vec!["Speed", "Quality"]);
    }

    #[test]
    fn wrong_typed_fields_count_as_missing() {
        let body = r#"{"scenario": 42, "useCase": ["a"], "budget": true, "features": "Speed"}"#;
        let request: AnalyzeRequest = serde_json::from_str(body).unwrap();
        assert!(request.scenario().is_none());
        assert!(request.use_case().is_none());
        assert!(request.budget().is_none());
        assert!(request.features().is_empty());
    }

    #[test]
    fn analyze_response_uses_recommended_ais_key() {
        let result = AnalysisResult::new("scenario".to_string(), vec![], "why");
        let json = serde_json::to_value(AnalyzeResponse::from(result)).unwrap();
        assert!(json.get("recommendedAIs").is_some());
        assert!(json.get("recommended_ais").is_none());
    }

    #[test]
    fn error_response_omits_absent_fields() {
        let json = serde_json::to_value(ErrorResponse::timeout()).unwrap();
        assert_eq!(json["code"], "TIMEOUT");
        assert!(json.get("message").is_none());

        let json = serde_json::to_value(ErrorResponse::validation("bad input")).unwrap();
        assert_eq!(json["error"], "Validation error");
        assert!(json.get("code").is_none());
    }
}
