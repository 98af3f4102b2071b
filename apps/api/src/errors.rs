use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::mapper::MapperError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    /// Rendered as 400: the request collides with existing data.
    #[error("{0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("AI recommendation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("AI recommendation failed: {0}")]
    RecommendationParse(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Mapping error: {0}")]
    Mapper(#[from] MapperError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR", self.to_string())
            }
            AppError::RecommendationParse(msg) => {
                tracing::error!("Recommendation did not match schema: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RECOMMENDATION_PARSE_ERROR",
                    self.to_string(),
                )
            }
            AppError::Upload(msg) => {
                tracing::error!("Upload error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "UPLOAD_ERROR", self.to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Mapper(e) => {
                tracing::error!("Mapper error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MAPPER_ERROR",
                    "A stored record could not be read".to_string(),
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
