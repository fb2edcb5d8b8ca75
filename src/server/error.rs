use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors surfaced by HTTP handlers as `{"detail": ...}` bodies
#[derive(Debug)]
pub enum ApiError {
    /// The request was understood but rejected
    BadRequest(String),
    /// The body could not be decoded
    Unprocessable(String),
}

impl ApiError {
    pub fn empty_query() -> Self {
        ApiError::BadRequest("Query cannot be empty".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        tracing::debug!("Rejecting request with {}: {}", status, detail);
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
