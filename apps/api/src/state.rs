use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::ratelimit::RateLimiter;
use crate::scoring::extractor::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable skill extractor. Production: LlmSkillExtractor; tests swap in fixtures.
    pub extractor: Arc<dyn SkillExtractor>,
    /// Pluggable admission control. InMemoryLimiter by default; RedisLimiter when REDIS_URL is set.
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub config: Config,
}
