use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::error::ApiError;
use super::{blocking, AppState};
use crate::blog::{BlogPost, BlogPostPatch, NewBlogPost, PostScore};

pub fn router() -> Router<AppState> {
    // `{key}` is a slug for GET and a numeric id for PUT / DELETE; the site's
    // client addresses posts as /api/blog/:slug and /api/blog/:id on one path
    Router::new()
        .route("/api/blog", get(list_posts).post(create_post))
        .route("/api/blog/search/{query}", get(search_posts))
        .route(
            "/api/blog/{key}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/blog/{key}/score", get(score_post))
}

fn parse_id(key: &str) -> Result<u64, ApiError> {
    key.parse::<u64>()
        .map_err(|_| ApiError::BadRequest("Invalid blog post ID".into()))
}

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    pub keyword: Option<String>,
}

// ── Handlers ────────────────────────────────────────────────────

pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let store = state.store.clone();
    let posts = blocking(move || Ok(store.list_published()?)).await?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let store = state.store.clone();
    let post = blocking(move || Ok(store.get_by_slug(&slug)?))
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog post not found".into()))?;
    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(body): Json<NewBlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), ApiError> {
    let store = state.store.clone();
    let post = blocking(move || Ok(store.create(body)?)).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(patch): Json<BlogPostPatch>,
) -> Result<Json<BlogPost>, ApiError> {
    let id = parse_id(&key)?;
    let store = state.store.clone();
    let post = blocking(move || Ok(store.update(id, patch)?))
        .await?
        .ok_or_else(|| ApiError::NotFound("Blog post not found".into()))?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&key)?;
    let store = state.store.clone();
    let removed = blocking(move || Ok(store.delete(id)?)).await?;
    if !removed {
        return Err(ApiError::NotFound("Blog post not found".into()));
    }
    Ok(Json(serde_json::json!({ "message": "Blog post deleted successfully" })))
}

pub async fn search_posts(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let store = state.store.clone();
    let posts = blocking(move || Ok(store.search(&query)?)).await?;
    Ok(Json(posts))
}

pub async fn score_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ScoreQuery>,
) -> Result<Json<PostScore>, ApiError> {
    let store = state.store.clone();
    let engine = state.engine.clone();
    let scored = blocking(move || {
        let post = store
            .get_by_slug(&slug)?
            .ok_or_else(|| ApiError::NotFound("Blog post not found".into()))?;
        Ok(PostScore::score(&engine, &post, query.keyword.as_deref()))
    })
    .await?;
    Ok(Json(scored))
}
