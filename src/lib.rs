//! AI Marketplace - LLM-backed tool recommendation API
//!
//! This crate serves a static catalog of AI tools and analyzes free-text user
//! scenarios with an LLM to recommend the best-fitting tools.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
