//! AI Marketplace API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai_marketplace::adapters::ai::{GroqConfig, GroqProvider};
use ai_marketplace::adapters::http::{api_router, AppState};
use ai_marketplace::adapters::rate_limiter::InMemoryRateLimiter;
use ai_marketplace::application::ScenarioAnalyzer;
use ai_marketplace::config::AppConfig;
use ai_marketplace::ports::{AiProvider, RateLimiter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AI Marketplace API");

    config.validate()?;

    let api_key = config
        .ai
        .groq_api_key
        .clone()
        .ok_or("GROQ_API_KEY must be set")?;

    let provider: Arc<dyn AiProvider> = Arc::new(GroqProvider::new(
        GroqConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    ));

    let analyzer = Arc::new(ScenarioAnalyzer::new(provider, config.ai.clone()));
    let limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()));

    let app = api_router(
        AppState { analyzer },
        limiter,
        &config.server.cors_origin,
    )?;

    let addr = config.server.socket_addr()?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("Health check: http://localhost:{}/api/health", addr.port());

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
