//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `catalog` - The static AI tool catalog and its records
//! - `sanitize` - Free-text input sanitization
//! - `analysis` - Analysis request/result types and their caps
//! - `recommendation` - Prompt construction and untrusted-reply parsing
//! - `fallback` - Degraded-mode ranking (rating sort, no LLM)

pub mod analysis;
pub mod catalog;
pub mod fallback;
pub mod recommendation;
pub mod sanitize;

pub use analysis::{AnalysisRequest, AnalysisResult, MAX_RECOMMENDATIONS};
pub use catalog::{AiTool, Catalog, CatalogEntry};
