//! AI provider adapters.
//!
//! Implementations of the `AiProvider` port.
//!
//! - `GroqProvider` - Groq's OpenAI-compatible chat completions API
//! - `MockAiProvider` - Configurable mock for testing

mod groq_provider;
mod mock_provider;

pub use groq_provider::{GroqConfig, GroqProvider};
pub use mock_provider::MockAiProvider;
