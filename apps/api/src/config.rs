use anyhow::{bail, Context, Result};

use crate::llm_client::Provider;

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key for the selected provider is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub api_key: String,
    /// When set, rate limiting uses a shared Redis counter instead of the
    /// in-process map (required for multi-process deployments).
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Combined resumeText + jobDescription ceiling, in characters.
    pub max_input_chars: usize,
    /// Minimum length for each text field, in characters.
    pub min_field_chars: usize,
    pub rate_limit_window_secs: u64,
    pub score_rate_limit: u32,
    pub cover_letter_rate_limit: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = match std::env::var("AI_PROVIDER")
            .unwrap_or_else(|_| "openai".to_string())
            .to_lowercase()
            .as_str()
        {
            "openai" => Provider::OpenAi,
            "gemini" => Provider::Gemini,
            other => bail!("AI_PROVIDER must be 'openai' or 'gemini', got '{other}'"),
        };

        let api_key = match provider {
            Provider::OpenAi => require_env("OPENAI_API_KEY")?,
            Provider::Gemini => require_env("GEMINI_API_KEY")?,
        };

        Ok(Config {
            provider,
            api_key,
            redis_url: std::env::var("REDIS_URL").ok(),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_input_chars: env_or("MAX_INPUT_CHARS", "40000")
                .parse::<usize>()
                .context("MAX_INPUT_CHARS must be a number")?,
            min_field_chars: env_or("MIN_FIELD_CHARS", "50")
                .parse::<usize>()
                .context("MIN_FIELD_CHARS must be a number")?,
            rate_limit_window_secs: env_or("RATE_LIMIT_WINDOW_SECS", "60")
                .parse::<u64>()
                .context("RATE_LIMIT_WINDOW_SECS must be a number")?,
            score_rate_limit: env_or("SCORE_RATE_LIMIT", "15")
                .parse::<u32>()
                .context("SCORE_RATE_LIMIT must be a number")?,
            cover_letter_rate_limit: env_or("COVER_LETTER_RATE_LIMIT", "10")
                .parse::<u32>()
                .context("COVER_LETTER_RATE_LIMIT must be a number")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
