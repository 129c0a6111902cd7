mod analysis;
mod config;
mod cover_letter;
mod errors;
mod llm_client;
mod ratelimit;
mod routes;
mod scoring;
mod state;
mod validation;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::ratelimit::{InMemoryLimiter, RateLimiter, RedisLimiter};
use crate::routes::build_router;
use crate::scoring::extractor::LlmSkillExtractor;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Royal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.provider, config.api_key.clone());
    info!("LLM client initialized (provider: {})", llm.provider().as_str());

    // Initialize skill extractor for the scoring pipeline
    let extractor = Arc::new(LlmSkillExtractor::new(llm.clone()));

    // Initialize rate limiter: shared Redis counter when configured,
    // in-process map otherwise
    let window = Duration::from_secs(config.rate_limit_window_secs);
    let rate_limiter: Arc<dyn RateLimiter> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.clone())?;
            info!("Rate limiter: redis ({}s window)", config.rate_limit_window_secs);
            Arc::new(RedisLimiter::new(client, config.rate_limit_window_secs))
        }
        None => {
            info!("Rate limiter: in-memory ({}s window)", config.rate_limit_window_secs);
            Arc::new(InMemoryLimiter::new(window))
        }
    };

    // Build app state
    let state = AppState {
        llm,
        extractor,
        rate_limiter,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
