//! Prompt construction and LLM reply parsing.
//!
//! The model reply is untrusted free text. Parsing is strict-then-lenient:
//! try a JSON array first, fall back to scanning for quoted numeric tokens,
//! and finally default to the first three catalog ids. Whatever comes out is
//! re-validated against the catalog before use; the model is never trusted
//! to emit only valid ids.

use once_cell::sync::Lazy;
use regex::Regex;

use super::analysis::{AnalysisRequest, MAX_RECOMMENDATIONS};
use super::catalog::{AiTool, Catalog};

/// System prompt for the ranking call.
pub const RANKING_SYSTEM_PROMPT: &str =
    "You are a helpful AI recommendation assistant. Always respond with valid JSON only.";

/// Ids used when no usable ids can be extracted from the reply.
const DEFAULT_IDS: [&str; 3] = ["1", "2", "3"];

static QUOTED_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["'](\d+)["']"#).expect("valid regex"));

fn or_not_specified(value: &str) -> &str {
    if value.is_empty() {
        "Not specified"
    } else {
        value
    }
}

/// Builds the ranking prompt from a sanitized request and the catalog.
pub fn build_ranking_prompt(request: &AnalysisRequest, catalog: &Catalog) -> String {
    let context = serde_json::to_string_pretty(&catalog.snapshot())
        .unwrap_or_else(|_| "[]".to_string());
    let features = if request.features.is_empty() {
        "Not specified".to_string()
    } else {
        request.features.join(", ")
    };

    format!(
        "You are an AI recommendation expert. Analyze this scenario and recommend the top 3-5 AI tools.\n\
         \n\
         USER REQUEST:\n\
         Scenario: {scenario}\n\
         Primary Use Case: {use_case}\n\
         Budget: {budget}\n\
         Required Features: {features}\n\
         \n\
         AVAILABLE AI TOOLS:\n\
         {context}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Recommend 3-5 AI tools that best match the user's needs\n\
         2. Return ONLY a valid JSON array with the AI IDs (as strings) in order of recommendation\n\
         3. Format: [\"1\", \"2\", \"3\"]\n\
         4. Consider budget, use case, and required features\n\
         \n\
         Return only the JSON array, nothing else.",
        scenario = request.scenario,
        use_case = or_not_specified(&request.use_case),
        budget = or_not_specified(&request.budget),
        features = features,
    )
}

/// Builds the explanation prompt for an already-resolved recommendation.
pub fn build_explanation_prompt(request: &AnalysisRequest, tools: &[AiTool]) -> String {
    let names: Vec<&str> = tools.iter().map(|tool| tool.name.as_str()).collect();
    let features = if request.features.is_empty() {
        "none specified".to_string()
    } else {
        request.features.join(", ")
    };

    format!(
        "Based on the scenario \"{scenario}\" with use case \"{use_case}\", budget \"{budget}\", \
         and features {features}, explain in 2-3 sentences why these AI tools are recommended: {names}",
        scenario = request.scenario,
        use_case = request.use_case,
        budget = request.budget,
        features = features,
        names = names.join(", "),
    )
}

/// Extracts candidate tool ids from an untrusted model reply.
///
/// Strict JSON-array parse first; string and number elements both count as
/// candidates. On parse failure, scans for quoted numeric tokens (at most
/// [`MAX_RECOMMENDATIONS`]) and defaults to `["1", "2", "3"]` when the scan
/// finds nothing. A successfully parsed empty array stays empty.
pub fn parse_recommended_ids(reply: &str) -> Vec<String> {
    let trimmed = reply.trim();

    if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(trimmed) {
        return values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect();
    }

    let scanned: Vec<String> = QUOTED_NUMBER
        .captures_iter(trimmed)
        .take(MAX_RECOMMENDATIONS)
        .map(|captures| captures[1].to_string())
        .collect();

    if scanned.is_empty() {
        DEFAULT_IDS.iter().map(|id| id.to_string()).collect()
    } else {
        scanned
    }
}

/// Resolves candidate ids against the catalog.
///
/// This is the sole trust boundary protecting against invented ids: only
/// purely numeric tokens with an exact catalog match survive, capped at
/// [`MAX_RECOMMENDATIONS`] entries, in reply order.
pub fn resolve_recommendations(ids: &[String], catalog: &Catalog) -> Vec<AiTool> {
    ids.iter()
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|id| catalog.find(id))
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AnalysisRequest {
        AnalysisRequest::from_raw(
            "I need to write blog posts",
            Some("Writing"),
            Some("$20/month"),
            &["Speed".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn ranking_prompt_embeds_request_and_catalog() {
        let prompt = build_ranking_prompt(&request(), Catalog::shared());
        assert!(prompt.contains("I need to write blog posts"));
        assert!(prompt.contains("Primary Use Case: Writing"));
        assert!(prompt.contains("\"ChatGPT\""));
        assert!(prompt.contains("Return only the JSON array"));
    }

    #[test]
    fn ranking_prompt_marks_missing_fields() {
        let request = AnalysisRequest::from_raw("scenario", None, None, &[]).unwrap();
        let prompt = build_ranking_prompt(&request, Catalog::shared());
        assert!(prompt.contains("Primary Use Case: Not specified"));
        assert!(prompt.contains("Budget: Not specified"));
        assert!(prompt.contains("Required Features: Not specified"));
    }

    #[test]
    fn explanation_prompt_names_resolved_tools() {
        let catalog = Catalog::shared();
        let tools = vec![catalog.find("1").unwrap().clone(), catalog.find("2").unwrap().clone()];
        let prompt = build_explanation_prompt(&request(), &tools);
        assert!(prompt.contains("ChatGPT, Claude"));
        assert!(prompt.contains("2-3 sentences"));
    }

    #[test]
    fn parses_strict_json_array() {
        assert_eq!(parse_recommended_ids(r#"["3", "1", "7"]"#), vec!["3", "1", "7"]);
    }

    #[test]
    fn parses_json_numbers_as_ids() {
        assert_eq!(parse_recommended_ids("[3, 1]"), vec!["3", "1"]);
    }

    #[test]
    fn strict_empty_array_stays_empty() {
        assert!(parse_recommended_ids("[]").is_empty());
    }

    #[test]
    fn falls_back_to_quoted_number_scan() {
        let reply = r#"Sure! I recommend "2" and "4", maybe also '6'."#;
        assert_eq!(parse_recommended_ids(reply), vec!["2", "4", "6"]);
    }

    #[test]
    fn scan_caps_at_five() {
        let reply = r#"ids: "1" "2" "3" "4" "5" "6" "7""#;
        assert_eq!(parse_recommended_ids(reply).len(), 5);
    }

    #[test]
    fn defaults_when_nothing_extractable() {
        assert_eq!(parse_recommended_ids("no tools for you"), vec!["1", "2", "3"]);
    }

    #[test]
    fn resolve_drops_unknown_and_non_numeric_ids() {
        let ids = vec![
            "2".to_string(),
            "999".to_string(),
            "1; DROP TABLE".to_string(),
            "3".to_string(),
        ];
        let resolved = resolve_recommendations(&ids, Catalog::shared());
        let names: Vec<&str> = resolved.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Claude", "Midjourney"]);
    }

    #[test]
    fn resolve_caps_at_five() {
        let ids: Vec<String> = (1..=8).map(|i| i.to_string()).collect();
        assert_eq!(resolve_recommendations(&ids, Catalog::shared()).len(), 5);
    }

    #[test]
    fn resolve_preserves_reply_order() {
        let ids = vec!["5".to_string(), "1".to_string()];
        let resolved = resolve_recommendations(&ids, Catalog::shared());
        assert_eq!(resolved[0].name, "Gemini");
        assert_eq!(resolved[1].name, "ChatGPT");
    }

    #[test]
    fn default_ids_resolve_against_builtin_catalog() {
        let resolved = resolve_recommendations(&parse_recommended_ids("garbage"), Catalog::shared());
        let ids: Vec<&str> = resolved.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
