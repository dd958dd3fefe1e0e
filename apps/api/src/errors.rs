use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::LlmError;

/// Message returned for every failure whose detail stays server-side.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("CORS blocked for origin: {0}")]
    CorsRejected(String),

    #[error("Upstream error (status {status}): {body}")]
    Upstream { status: u16, body: Value },

    #[error("LLM error: {0}")]
    Llm(LlmError),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Upstream { status, body } => AppError::Upstream { status, body },
            other => AppError::Llm(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, Value::String(msg)),
            AppError::CorsRejected(origin) => {
                tracing::warn!("CORS blocked for origin: {origin}");
                (
                    StatusCode::FORBIDDEN,
                    Value::String(format!("CORS blocked for origin: {origin}")),
                )
            }
            AppError::Upstream { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, body)
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String(SERVER_ERROR_MESSAGE.to_string()),
                )
            }
        };

        (status, Json(json!({ "error": error }))).into_response()
    }
}
