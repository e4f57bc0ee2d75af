use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::history::store::StoreError;

/// The one message users see for any failed batch, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate content. Please check your API key and try again.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please enter your Gemini API key")]
    MissingApiKey,

    #[error("Please enter keywords to generate content")]
    MissingKeywords,

    #[error("Please select at least one content type")]
    NoContentTypes,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("A generation batch is already running")]
    BatchInProgress,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingApiKey => (
                StatusCode::BAD_REQUEST,
                "MISSING_API_KEY",
                self.to_string(),
            ),
            AppError::MissingKeywords => (
                StatusCode::BAD_REQUEST,
                "MISSING_KEYWORDS",
                self.to_string(),
            ),
            AppError::NoContentTypes => (
                StatusCode::BAD_REQUEST,
                "NO_CONTENT_TYPES",
                self.to_string(),
            ),
            AppError::Generation(cause) => {
                tracing::error!("Generation error: {cause}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    GENERATION_FAILED_MESSAGE.to_string(),
                )
            }
            AppError::BatchInProgress => (
                StatusCode::CONFLICT,
                "BATCH_IN_PROGRESS",
                self.to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
