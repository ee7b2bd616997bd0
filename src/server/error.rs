use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::blog::StoreError;
use crate::notify::NotifyError;

/// Error returned by every handler, rendered as `{"error": message}`
#[derive(Debug)]
pub enum ApiError {
    Store(StoreError),
    Notify(NotifyError),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

impl From<NotifyError> for ApiError {
    fn from(err: NotifyError) -> Self {
        Self::Notify(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("background task failed: {err}"))
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Store(StoreError::NotFound(msg)) | ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, msg.clone())
            }
            ApiError::Store(StoreError::Validation(msg))
            | ApiError::Notify(NotifyError::Validation(msg))
            | ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Store(StoreError::Conflict(msg)) => (StatusCode::CONFLICT, msg.clone()),
            ApiError::Store(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            ApiError::Notify(other) => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {}", message);
        }

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
