//! The static AI tool catalog.
//!
//! The catalog is process-wide immutable state: it is built once at startup
//! and never mutated. Every recommendation the service returns must resolve
//! to an entry in this list.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A single AI tool record in the marketplace catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiTool {
    /// Unique numeric-string identifier ("1", "2", ...).
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub features: Vec<String>,
    pub pricing: String,
    /// User rating in [0, 5].
    pub rating: f32,
    pub use_cases: Vec<String>,
    pub website: String,
}

/// Projection of a tool used in the LLM prompt context.
///
/// Only the fields the model needs to rank by; descriptions and websites
/// stay out of the prompt to keep it small.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub rating: f32,
    pub features: Vec<String>,
}

/// The fixed marketplace catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<AiTool>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);

impl Catalog {
    /// Returns the shared process-wide catalog.
    pub fn shared() -> &'static Catalog {
        &CATALOG
    }

    /// All tools in stable order.
    pub fn tools(&self) -> &[AiTool] {
        &self.tools
    }

    /// Looks up a tool by exact id match.
    pub fn find(&self, id: &str) -> Option<&AiTool> {
        self.tools.iter().find(|tool| tool.id == id)
    }

    /// Returns the prompt projection of the catalog.
    pub fn snapshot(&self) -> Vec<CatalogEntry> {
        self.tools
            .iter()
            .map(|tool| CatalogEntry {
                id: tool.id.clone(),
                name: tool.name.clone(),
                category: tool.category.clone(),
                rating: tool.rating,
                features: tool.features.clone(),
            })
            .collect()
    }

    /// Builds the fixed catalog shipped with the service.
    pub fn builtin() -> Self {
        fn tool(
            id: &str,
            name: &str,
            description: &str,
            category: &str,
            features: &[&str],
            pricing: &str,
            rating: f32,
            use_cases: &[&str],
            website: &str,
        ) -> AiTool {
            AiTool {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                features: features.iter().map(|s| s.to_string()).collect(),
                pricing: pricing.to_string(),
                rating,
                use_cases: use_cases.iter().map(|s| s.to_string()).collect(),
                website: website.to_string(),
            }
        }

        Self {
            tools: vec![
                tool(
                    "1",
                    "ChatGPT",
                    "Conversational assistant for writing, coding, and general problem solving",
                    "Content Generation",
                    &["Fast", "Reliable"],
                    "Free / $20 per month",
                    4.8,
                    &["Writing", "Coding"],
                    "https://chat.openai.com",
                ),
                tool(
                    "2",
                    "Claude",
                    "Assistant focused on careful analysis, long documents, and honest answers",
                    "Content Generation",
                    &["Accurate", "Detailed"],
                    "Free / $20 per month",
                    4.9,
                    &["Analysis", "Writing"],
                    "https://claude.ai",
                ),
                tool(
                    "3",
                    "Midjourney",
                    "Image generation with a strong artistic style and active community",
                    "Image & Video",
                    &["Creative", "Fast"],
                    "From $10 per month",
                    4.8,
                    &["Art", "Design"],
                    "https://midjourney.com",
                ),
                tool(
                    "4",
                    "Cursor",
                    "AI-first code editor with whole-codebase awareness and refactoring",
                    "Coding",
                    &["Intelligent", "Fast"],
                    "Free / $20 per month",
                    4.8,
                    &["Development"],
                    "https://cursor.com",
                ),
                tool(
                    "5",
                    "Gemini",
                    "Multimodal assistant with real-time data and Google Workspace integration",
                    "Content Generation",
                    &["Comprehensive", "Reliable"],
                    "Free / $20 per month",
                    4.7,
                    &["Research", "Writing"],
                    "https://gemini.google.com",
                ),
                tool(
                    "6",
                    "Copilot",
                    "In-editor code completion integrated with GitHub and major IDEs",
                    "Coding",
                    &["Smart", "Integrated"],
                    "From $10 per month",
                    4.7,
                    &["Development"],
                    "https://github.com/features/copilot",
                ),
                tool(
                    "7",
                    "DALL-E",
                    "Prompt-faithful image generation suited to marketing and concept art",
                    "Image & Video",
                    &["Creative", "Unique"],
                    "Pay per image",
                    4.6,
                    &["Art", "Marketing"],
                    "https://openai.com/dall-e",
                ),
                tool(
                    "8",
                    "Perplexity",
                    "Search-grounded answers with citations and current information",
                    "Research",
                    &["Accurate", "Cited"],
                    "Free / $20 per month",
                    4.5,
                    &["Research", "Analysis"],
                    "https://perplexity.ai",
                ),
                tool(
                    "9",
                    "Runway",
                    "Professional video generation and AI-powered editing effects",
                    "Image & Video",
                    &["Professional", "Creative"],
                    "From $15 per month",
                    4.6,
                    &["Video", "Effects"],
                    "https://runwayml.com",
                ),
                tool(
                    "10",
                    "NotebookLM",
                    "Source-grounded notebook for organizing and querying your own documents",
                    "Research",
                    &["Organized", "Smart"],
                    "Free",
                    4.4,
                    &["Note-taking", "Analysis"],
                    "https://notebooklm.google.com",
                ),
            ],
        }
    }
}
