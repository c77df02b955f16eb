//! Degraded-mode ranking.
//!
//! Clients of this API fall back to a local best-effort ranking when the
//! analyze endpoint fails: filter the bundled catalog by use case, sort by
//! rating, take the top three. This module is that strategy, kept explicitly
//! separate from the LLM-driven pipeline — the two have different inputs and
//! guarantees and are never merged.

use super::analysis::AnalysisResult;
use super::catalog::{AiTool, Catalog};

/// Number of tools a degraded-mode ranking returns.
pub const FALLBACK_COUNT: usize = 3;

/// Explanation used when no model-generated text is available.
pub const FALLBACK_EXPLANATION: &str = "Based on your scenario, we've analyzed your needs and \
     selected these AI tools that best match your requirements.";

/// Ranks the catalog without an LLM.
///
/// Filters by case-insensitive substring match of `use_case` against each
/// tool's use cases (an empty use case matches everything), sorts descending
/// by rating with catalog order preserved for ties, and keeps the top three.
pub fn rank_by_rating(catalog: &Catalog, use_case: &str) -> Vec<AiTool> {
    let needle = use_case.to_lowercase();

    let mut matched: Vec<AiTool> = catalog
        .tools()
        .iter()
        .filter(|tool| {
            needle.is_empty()
                || tool
                    .use_cases
                    .iter()
                    .any(|uc| uc.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    matched.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));
    matched.truncate(FALLBACK_COUNT);
    matched
}

/// Produces a complete degraded-mode analysis result.
pub fn analyze_locally(catalog: &Catalog, scenario: String, use_case: &str) -> AnalysisResult {
    let recommended = rank_by_rating(catalog, use_case);
    AnalysisResult::new(scenario, recommended, FALLBACK_EXPLANATION)
}
