//! HTTP API
//!
//! axum on tokio. Store transactions and relay calls are blocking, so
//! handlers hand them to `spawn_blocking` through [`blocking`].
//!
//! # Routes
//!
//! ```text
//! GET    /health
//! POST   /api/seo/score
//! GET    /api/blog                  POST /api/blog
//! GET    /api/blog/{slug}           PUT/DELETE /api/blog/{id}
//! GET    /api/blog/search/{query}
//! GET    /api/blog/{slug}/score?keyword=
//! POST   /api/contact  /api/demo-request  /api/subscribe
//! ```

mod blog;
mod error;
mod forms;
mod seo;

pub use error::ApiError;

use crate::blog::BlogStore;
use crate::config::{NotifyConfig, ProjectConfig};
use crate::notify::{Relay, RelayClient};
use crate::rules::RuleEngine;
use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<BlogStore>,
    pub engine: Arc<RuleEngine>,
    pub relay: Arc<dyn Relay>,
    pub notify: Arc<NotifyConfig>,
}

impl AppState {
    pub fn new(store: BlogStore, engine: RuleEngine, relay: Arc<dyn Relay>, notify: NotifyConfig) -> Self {
        Self {
            store: Arc::new(store),
            engine: Arc::new(engine),
            relay,
            notify: Arc::new(notify),
        }
    }
}

/// Run blocking work off the async executor
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(seo::router())
        .merge(blog::router())
        .merge(forms::router())
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Open the store and serve until Ctrl-C
pub async fn run(config: ProjectConfig) -> Result<()> {
    let db_path = config.blog_db_path();
    let store = BlogStore::open(&db_path)
        .with_context(|| format!("Failed to open blog store at {}", db_path.display()))?;

    let relay = RelayClient::from_config(&config.notify);
    if !relay.is_configured() {
        warn!("No relay URL configured; form submissions will not send e-mail");
    }

    let state = AppState::new(
        store,
        RuleEngine::with_default_rules(config.analysis.clone()),
        Arc::new(relay),
        config.notify.clone(),
    );
    let app = build_router(state, &config.server.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    info!(addr = %config.server.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

#[cfg(test)]
mod tests;
