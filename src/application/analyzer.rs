//! Scenario analysis pipeline.
//!
//! One sequential pass per request: validate, build the ranking prompt, call
//! the LLM, parse and re-validate the reply against the catalog, call the LLM
//! again for a short explanation, compose the result. Both outbound calls run
//! under the same timeout budget; no retries anywhere — a failed call is
//! terminal for the request.

use std::sync::Arc;

use crate::config::AiConfig;
use crate::domain::analysis::{AnalysisRequest, AnalysisResult};
use crate::domain::catalog::Catalog;
use crate::domain::recommendation::{
    build_explanation_prompt, build_ranking_prompt, parse_recommended_ids,
    resolve_recommendations, RANKING_SYSTEM_PROMPT,
};
use crate::ports::{AiError, AiProvider, CompletionRequest, MessageRole};

/// Failures of the analysis pipeline, mapped to HTTP statuses at the edge.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Client input malformed; no external call was made.
    #[error("{0}")]
    Validation(String),

    /// An LLM call exceeded its timeout budget.
    #[error("analysis timed out")]
    Timeout,

    /// Any other failure (network, provider, unexpected).
    #[error("analysis failed: {0}")]
    Provider(AiError),
}

impl From<AiError> for AnalysisError {
    fn from(err: AiError) -> Self {
        if err.is_timeout() {
            AnalysisError::Timeout
        } else {
            AnalysisError::Provider(err)
        }
    }
}

/// Orchestrates the LLM-driven recommendation pipeline.
pub struct ScenarioAnalyzer {
    provider: Arc<dyn AiProvider>,
    catalog: &'static Catalog,
    config: AiConfig,
}

impl ScenarioAnalyzer {
    /// Creates an analyzer over the shared catalog.
    pub fn new(provider: Arc<dyn AiProvider>, config: AiConfig) -> Self {
        Self {
            provider,
            catalog: Catalog::shared(),
            config,
        }
    }

    /// Runs the full pipeline on raw user input.
    pub async fn analyze(
        &self,
        scenario: &str,
        use_case: Option<&str>,
        budget: Option<&str>,
        features: &[String],
    ) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalysisRequest::from_raw(scenario, use_case, budget, features)
            .ok_or_else(|| {
                AnalysisError::Validation(
                    "Scenario is required and must be a non-empty string".to_string(),
                )
            })?;

        let ranking_prompt = build_ranking_prompt(&request, self.catalog);
        let completion = self
            .provider
            .complete(
                CompletionRequest::new()
                    .with_message(MessageRole::System, RANKING_SYSTEM_PROMPT)
                    .with_message(MessageRole::User, ranking_prompt)
                    .with_temperature(self.config.temperature)
                    .with_max_tokens(self.config.max_tokens),
            )
            .await?;

        let ids = parse_recommended_ids(&completion.content);
        let recommended = resolve_recommendations(&ids, self.catalog);
        tracing::debug!(
            candidates = ids.len(),
            resolved = recommended.len(),
            "resolved recommendations against catalog"
        );

        let explanation_prompt = build_explanation_prompt(&request, &recommended);
        let explanation = self
            .provider
            .complete(
                CompletionRequest::new()
                    .with_message(MessageRole::User, explanation_prompt)
                    .with_temperature(self.config.temperature)
                    .with_max_tokens(self.config.max_tokens),
            )
            .await?;

        Ok(AnalysisResult::new(
            request.scenario,
            recommended,
            &explanation.content,
        ))
    }
}
