//! Axum route handlers for the Scoring API.

use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::ratelimit::client_key;
use crate::scoring::scorer::{self, ScoreReport};
use crate::state::AppState;
use crate::validation::validate_text_pair;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
    /// Free-form client label; logged but not consumed by the scorer.
    #[serde(default)]
    pub mode: Option<String>,
}

/// POST /api/v1/score
///
/// Validates input, runs one extraction call, then the deterministic scorer.
/// Rate limited per client identifier.
pub async fn handle_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreReport>, AppError> {
    let key = client_key(&headers);
    if !state
        .rate_limiter
        .allow(&key, state.config.score_rate_limit)
        .await?
    {
        return Err(AppError::RateLimited);
    }

    validate_text_pair(
        &request.resume_text,
        &request.job_description,
        &state.config,
    )?;

    if let Some(mode) = &request.mode {
        debug!("score request mode: {mode}");
    }

    let resume_text = request.resume_text.trim();
    let job_description = request.job_description.trim();

    let extraction = state.extractor.extract(resume_text, job_description).await?;
    let report = scorer::score(&extraction, resume_text);

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::{LlmClient, Provider};
    use crate::ratelimit::InMemoryLimiter;
    use crate::scoring::extractor::{ExtractionResult, SkillExtractor};
    use crate::scoring::scorer::Ranking;

    /// Canned extractor so the pipeline runs without a live model.
    struct FixtureExtractor(ExtractionResult);

    #[async_trait]
    impl SkillExtractor for FixtureExtractor {
        async fn extract(
            &self,
            _resume_text: &str,
            _job_description: &str,
        ) -> Result<ExtractionResult, AppError> {
            Ok(self.0.clone())
        }
    }

    fn test_state(extraction: ExtractionResult) -> AppState {
        let config = Config {
            provider: Provider::OpenAi,
            api_key: "test-key".to_string(),
            redis_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            max_input_chars: 40_000,
            min_field_chars: 50,
            rate_limit_window_secs: 60,
            score_rate_limit: 3,
            cover_letter_rate_limit: 10,
        };
        AppState {
            llm: LlmClient::new(Provider::OpenAi, "test-key".to_string()),
            extractor: Arc::new(FixtureExtractor(extraction)),
            rate_limiter: Arc::new(InMemoryLimiter::new(Duration::from_secs(60))),
            config,
        }
    }

    fn request(resume_text: &str, job_description: &str) -> ScoreRequest {
        ScoreRequest {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
            mode: None,
        }
    }

    fn filler(prefix: &str) -> String {
        format!("{prefix} {}", "lorem ipsum dolor sit amet ".repeat(5))
    }

    #[tokio::test]
    async fn test_score_endpoint_end_to_end() {
        let extraction = ExtractionResult {
            required_skills: vec!["Python".to_string(), "SQL".to_string()],
            preferred_skills: vec!["AWS".to_string()],
            resume_skills: vec!["python".to_string(), "excel".to_string()],
            keywords: vec!["agile".to_string()],
        };
        let state = test_state(extraction);

        let result = handle_score(
            State(state),
            HeaderMap::new(),
            Json(request(&filler("Agile environment with Python"), &filler("JD"))),
        )
        .await
        .unwrap();

        let report = result.0;
        assert_eq!(report.skills_match_pct, 40);
        assert_eq!(report.overall_match_pct, 64);
        assert_eq!(report.ranking, Ranking::Moderate);
        assert_eq!(report.missing_skills, vec!["sql"]);
    }

    #[tokio::test]
    async fn test_score_endpoint_rejects_short_resume() {
        let state = test_state(ExtractionResult::default());
        let err = handle_score(
            State(state),
            HeaderMap::new(),
            Json(request("too short", &filler("JD"))),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_score_endpoint_rate_limits_after_budget() {
        let state = test_state(ExtractionResult::default());

        for _ in 0..3 {
            handle_score(
                State(state.clone()),
                HeaderMap::new(),
                Json(request(&filler("resume"), &filler("JD"))),
            )
            .await
            .unwrap();
        }

        let err = handle_score(
            State(state),
            HeaderMap::new(),
            Json(request(&filler("resume"), &filler("JD"))),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::RateLimited));
    }
}
