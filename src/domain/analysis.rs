//! Scenario analysis request and result types.

use super::catalog::AiTool;
use super::sanitize::{sanitize_list, sanitize_text};

/// Maximum scenario length in characters.
pub const MAX_SCENARIO_LEN: usize = 500;
/// Maximum use-case length in characters.
pub const MAX_USE_CASE_LEN: usize = 100;
/// Maximum budget length in characters.
pub const MAX_BUDGET_LEN: usize = 100;
/// Maximum explanation length returned to callers.
pub const MAX_EXPLANATION_LEN: usize = 1000;
/// Maximum number of recommended tools per result.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// A sanitized scenario analysis request.
///
/// Construction sanitizes every field; a value of this type never carries
/// markup characters or over-length text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub scenario: String,
    pub use_case: String,
    pub budget: String,
    pub features: Vec<String>,
}

impl AnalysisRequest {
    /// Builds a sanitized request from raw user input.
    ///
    /// Returns `None` when the scenario is empty after trimming; callers
    /// treat that as a validation failure before any external call is made.
    pub fn from_raw(
        scenario: &str,
        use_case: Option<&str>,
        budget: Option<&str>,
        features: &[String],
    ) -> Option<Self> {
        if scenario.trim().is_empty() {
            return None;
        }
        Some(Self {
            scenario: sanitize_text(scenario, MAX_SCENARIO_LEN),
            use_case: sanitize_text(use_case.unwrap_or(""), MAX_USE_CASE_LEN),
            budget: sanitize_text(budget.unwrap_or(""), MAX_BUDGET_LEN),
            features: sanitize_list(features),
        })
    }
}

/// The outcome of a scenario analysis.
///
/// Invariant: every tool in `recommended_ais` is drawn from the static
/// catalog and the list holds at most [`MAX_RECOMMENDATIONS`] entries.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub scenario: String,
    pub recommended_ais: Vec<AiTool>,
    pub explanation: String,
}

impl AnalysisResult {
    /// Composes a result, truncating the explanation to its cap.
    pub fn new(scenario: String, recommended_ais: Vec<AiTool>, explanation: &str) -> Self {
        Self {
            scenario,
            recommended_ais,
            explanation: explanation.chars().take(MAX_EXPLANATION_LEN).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scenario_is_rejected() {
        assert!(AnalysisRequest::from_raw("", None, None, &[]).is_none());
        assert!(AnalysisRequest::from_raw("   ", None, None, &[]).is_none());
    }

    #[test]
    fn fields_are_sanitized_on_construction() {
        let request = AnalysisRequest::from_raw(
            " write <b>blog</b> posts ",
            Some("Writing"),
            None,
            &["Speed".to_string(), "<script>".to_string()],
        )
        .unwrap();

        assert_eq!(request.scenario, "write blog posts");
        assert_eq!(request.use_case, "Writing");
        assert_eq!(request.budget, "");
        assert_eq!(request.features, vec!["Speed"]);
    }

    #[test]
    fn long_scenario_is_truncated_to_cap() {
        let long = "a".repeat(800);
        let request = AnalysisRequest::from_raw(&long, None, None, &[]).unwrap();
        assert_eq!(request.scenario.len(), MAX_SCENARIO_LEN);
    }

    #[test]
    fn explanation_is_truncated_to_cap() {
        let result = AnalysisResult::new("s".to_string(), vec![], &"e".repeat(1500));
        assert_eq!(result.explanation.chars().count(), MAX_EXPLANATION_LEN);
    }

    #[test]
    fn short_explanation_is_kept_verbatim() {
        let result = AnalysisResult::new("s".to_string(), vec![], "short answer");
        assert_eq!(result.explanation, "short answer");
    }
}
