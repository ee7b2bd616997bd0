use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use super::error::ApiError;
use super::{blocking, AppState};
use crate::notify::{
    submit_contact, submit_demo_request, submit_subscription, ContactForm, DemoRequest,
    FormOutcome, Subscription,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(contact))
        .route("/api/demo-request", post(demo_request))
        .route("/api/subscribe", post(subscribe))
}

// Relay calls are synchronous HTTP, so every flow runs on the blocking pool

pub async fn contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<FormOutcome>, ApiError> {
    let outcome = blocking(move || {
        Ok(submit_contact(state.relay.as_ref(), &state.notify, form)?)
    })
    .await?;
    Ok(Json(outcome))
}

pub async fn demo_request(
    State(state): State<AppState>,
    Json(request): Json<DemoRequest>,
) -> Result<Json<FormOutcome>, ApiError> {
    let outcome = blocking(move || {
        Ok(submit_demo_request(state.relay.as_ref(), &state.notify, request)?)
    })
    .await?;
    Ok(Json(outcome))
}

pub async fn subscribe(
    State(state): State<AppState>,
    Json(subscription): Json<Subscription>,
) -> Result<Json<FormOutcome>, ApiError> {
    let outcome = blocking(move || {
        Ok(submit_subscription(state.relay.as_ref(), &state.notify, subscription)?)
    })
    .await?;
    Ok(Json(outcome))
}
