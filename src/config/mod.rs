//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Nested values use `__` as separator
//! (`SERVER__PORT=3001`), and the flat deployment variables `PORT`,
//! `GROQ_API_KEY`, and `CORS_ORIGIN` are honored as overrides.
//!
//! # Example
//!
//! ```no_run
//! use ai_marketplace::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod rate_limit;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use rate_limit::RateLimitSettings;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, CORS origin)
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM provider configuration (Groq)
    #[serde(default)]
    pub ai: AiConfig,

    /// Per-IP rate limit settings
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present (development), then reads environment
    /// variables with `__` separating nested values. The flat names `PORT`,
    /// `GROQ_API_KEY`, and `CORS_ORIGIN` take precedence when set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(config::Environment::default().separator("__"));

        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY") {
            builder = builder.set_override("ai.groq_api_key", key)?;
        }
        if let Ok(origin) = std::env::var("CORS_ORIGIN") {
            builder = builder.set_override("server.cors_origin", origin)?;
        }

        let config = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.rate_limit.validate()?;
        Ok(())
    }
}
