//! JSON error responses.
//!
//! Every error body is `{"error": "..."}` with a generic message; the
//! underlying error text only appears in `details` when diagnostics are
//! explicitly enabled.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::ApiError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Map an [`ApiError`] to its status and generic message. When `expose`
    /// is set the original error text rides along in `details`.
    pub fn from_api(err: ApiError, expose: bool) -> Self {
        let (status, message) = match &err {
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, "missing bearer token"),
            ApiError::InvalidToken(_) => (StatusCode::FORBIDDEN, "invalid token"),
            ApiError::BadCredentials => (StatusCode::UNAUTHORIZED, "authentication failed"),
            ApiError::NoData(_) => (StatusCode::NOT_FOUND, "no data found"),
            ApiError::Upstream(_) | ApiError::Http(_) | ApiError::Json(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "data source error")
            }
            ApiError::Config(_) | ApiError::Io(_) | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };

        Self {
            status,
            message: message.into(),
            details: expose.then(|| err.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
