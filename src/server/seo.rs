use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use super::AppState;
use crate::models::{ArticleInput, ScoringResult};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/seo/score", post(score))
}

/// Score an unsaved article (editor preview)
pub async fn score(
    State(state): State<AppState>,
    Json(input): Json<ArticleInput>,
) -> Json<ScoringResult> {
    Json(state.engine.evaluate(&input))
}
