//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::models::{LayoutAnalysis, MatchAnalysis, OptimizationPlan};
use crate::analysis::prompts::{
    layout_system, match_system, optimize_system, LAYOUT_PROMPT_TEMPLATE, MATCH_PROMPT_TEMPLATE,
    OPTIMIZE_PROMPT_TEMPLATE,
};
use crate::errors::AppError;
use crate::state::AppState;
use crate::validation::{validate_resume_text, validate_text_pair};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutCheckRequest {
    #[serde(default)]
    pub resume_text: String,
}

/// POST /api/v1/match
///
/// Full LLM match analysis with per-category scores and keyword gaps.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<MatchAnalysis>, AppError> {
    validate_text_pair(
        &request.resume_text,
        &request.job_description,
        &state.config,
    )?;

    let prompt = MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", request.resume_text.trim())
        .replace("{job_description}", request.job_description.trim());

    let analysis = state
        .llm
        .call_json::<MatchAnalysis>(&prompt, &match_system())
        .await
        .map_err(|e| AppError::Llm(format!("Match analysis failed: {e}")))?;

    Ok(Json(analysis))
}

/// POST /api/v1/optimize
///
/// Step-by-step optimization plan. Backfills optimizedResumeText and
/// changesSummary when the model leaves them out.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<OptimizationPlan>, AppError> {
    validate_text_pair(
        &request.resume_text,
        &request.job_description,
        &state.config,
    )?;

    let resume_text = request.resume_text.trim();
    let prompt = OPTIMIZE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", request.job_description.trim());

    let mut plan = state
        .llm
        .call_json::<OptimizationPlan>(&prompt, &optimize_system())
        .await
        .map_err(|e| AppError::Llm(format!("Optimization failed: {e}")))?;

    if plan
        .optimized_resume_text
        .as_deref()
        .map_or(true, |t| t.trim().is_empty())
    {
        plan.optimized_resume_text = Some(resume_text.to_string());
    }
    if plan.changes_summary.as_deref().map_or(true, |s| s.is_empty()) {
        plan.changes_summary = Some(vec![
            "Resume optimized for better ATS alignment with job description".to_string(),
        ]);
    }

    Ok(Json(plan))
}

/// POST /api/v1/layout-check
///
/// ATS-compatibility layout report over resume text alone.
pub async fn handle_layout_check(
    State(state): State<AppState>,
    Json(request): Json<LayoutCheckRequest>,
) -> Result<Json<LayoutAnalysis>, AppError> {
    validate_resume_text(&request.resume_text, &state.config)?;

    let prompt = LAYOUT_PROMPT_TEMPLATE.replace("{resume_text}", request.resume_text.trim());

    let analysis = state
        .llm
        .call_json::<LayoutAnalysis>(&prompt, &layout_system())
        .await
        .map_err(|e| AppError::Llm(format!("Layout analysis failed: {e}")))?;

    Ok(Json(analysis))
}
