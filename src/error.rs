use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;
use utoipa::ToSchema;

/// ApiError
///
/// The application's error taxonomy. Every service operation resolves to
/// either a success value or exactly one of these kinds; the boundary layer
/// (this type's `IntoResponse` impl) owns the translation to HTTP.
///
/// NotFound and Forbidden are deterministic policy outcomes — they are raised
/// immediately, never swallowed, and never retried. Database and Internal
/// cover store or infrastructure failures; their details are logged but not
/// leaked to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Referenced entity id does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Authenticated but not authorized for this operation (403).
    #[error("{0}")]
    Forbidden(String),

    /// Malformed input rejected at the request boundary (400).
    #[error("{0}")]
    Validation(String),

    /// Store failure (500). Wraps the underlying sqlx error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other failure (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// not_found
    ///
    /// Convenience constructor matching the common "X not found with id: Y" shape.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{} not found with id: {}", resource, id))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }
}

/// ErrorResponse
///
/// The JSON envelope returned for every error, regardless of kind.
/// Shape: `{timestamp, status, error, message}`.
#[derive(Debug, Clone, Serialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorResponse {
    #[ts(type = "string")]
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "Forbidden", msg.clone()),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "Validation Failed", msg.clone())
            }
            ApiError::Database(err) => {
                // Log the real error but keep the client message generic.
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
