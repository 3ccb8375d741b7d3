//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::config::ConfigError;
use crate::dates::DateError;
use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Start or end segment is not a date (400)
    #[error(transparent)]
    MalformedDate(#[from] DateError),

    /// Store unreachable or query failed (500, logged)
    #[error(transparent)]
    Database(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::MalformedDate(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "malformed_date",
                    "message": e.to_string()
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Server startup and runtime errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
