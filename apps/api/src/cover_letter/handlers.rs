//! Axum route handler for the Cover Letter API.

use axum::{extract::State, http::HeaderMap, Json};

use crate::cover_letter::models::{CoverLetterRequest, CoverLetterResponse, Length, Tone};
use crate::cover_letter::prompts::{cover_letter_prompt, cover_letter_system};
use crate::errors::AppError;
use crate::ratelimit::client_key;
use crate::state::AppState;
use crate::validation::validate_text_pair;

/// POST /api/v1/cover-letter
///
/// Generates a tailored cover letter. Rate limited per client identifier,
/// with a tighter budget than scoring.
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let key = client_key(&headers);
    if !state
        .rate_limiter
        .allow(&key, state.config.cover_letter_rate_limit)
        .await?
    {
        return Err(AppError::RateLimited);
    }

    validate_text_pair(
        &request.resume_text,
        &request.job_description,
        &state.config,
    )?;

    let tone = match &request.tone {
        Some(value) => Tone::parse(value)?,
        None => Tone::default(),
    };
    let length = match &request.length {
        Some(value) => Length::parse(value)?,
        None => Length::default(),
    };

    let prompt = cover_letter_prompt(
        request.resume_text.trim(),
        request.job_description.trim(),
        request.company_name.as_deref(),
        request.role_title.as_deref(),
        request.hiring_manager.as_deref(),
        request.location.as_deref(),
        &request.key_highlights,
        request.user_name.as_deref(),
        request.contact_info.as_deref(),
    );

    let response = state
        .llm
        .call_json::<CoverLetterResponse>(&prompt, &cover_letter_system(tone, length))
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    Ok(Json(response))
}
