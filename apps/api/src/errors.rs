use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compare::import::ImportError;
use crate::upstream::UpstreamError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid username format: {0}")]
    InvalidUsername(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Upstream timeout")]
    Timeout,
}

impl AppError {
    /// Builds the error for a failed upstream call about `username`.
    pub fn from_upstream(err: UpstreamError, username: &str) -> Self {
        match err {
            UpstreamError::NotFound => AppError::NotFound(username.to_string()),
            UpstreamError::RateLimited => AppError::RateLimited,
            UpstreamError::Timeout => AppError::Timeout,
            other => AppError::Upstream(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidUsername(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Client-side retry makes sense for rate limiting and server-side failures only.
    pub fn is_retryable(&self) -> bool {
        let status = self.status();
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }
}

impl From<ImportError> for AppError {
    fn from(e: ImportError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::InvalidUsername(_) => {
                ("INVALID_FORMAT", "Invalid username format".to_string())
            }
            AppError::NotFound(username) => (
                "USER_NOT_FOUND",
                format!("Profile \"{username}\" not found"),
            ),
            AppError::RateLimited => (
                "RATE_LIMITED",
                "Too many requests. Please try again later.".to_string(),
            ),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    "UPSTREAM_ERROR",
                    "The profile API is currently unavailable".to_string(),
                )
            }
            AppError::Timeout => {
                tracing::error!("Upstream request timed out");
                ("TIMEOUT", "Request timeout. Please try again.".to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": self.is_retryable()
            }
        }));

        (status, body).into_response()
    }
}
