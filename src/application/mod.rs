//! Application layer - orchestrates domain operations over the ports.

pub mod analyzer;

pub use analyzer::{AnalysisError, ScenarioAnalyzer};
