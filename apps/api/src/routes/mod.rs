pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::analysis::handlers as analysis;
use crate::cover_letter::handlers as cover_letter;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/score", post(scoring::handle_score))
        .route("/api/v1/match", post(analysis::handle_match))
        .route("/api/v1/optimize", post(analysis::handle_optimize))
        .route("/api/v1/layout-check", post(analysis::handle_layout_check))
        .route("/api/v1/cover-letter", post(cover_letter::handle_cover_letter))
        .with_state(state)
}
