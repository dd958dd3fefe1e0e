//! Axum route handler for the AI coach pass-through.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::coach::models::CoachRequest;
use crate::errors::AppError;
use crate::feedback::validation::validate_coach_prompt;
use crate::llm_client::{ChatCompletions, ChatRequest};
use crate::state::AppState;

pub const COACH_TEMPERATURE: f32 = 0.7;

/// POST /api/coach
///
/// Mirrors the raw upstream payload. Any 2xx becomes 200; other statuses pass through.
pub async fn handle_coach(
    State(state): State<AppState>,
    payload: Option<Json<CoachRequest>>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();
    let prompt = validate_coach_prompt(body)?;

    let reply = state
        .llm
        .send(&ChatRequest::user_only(prompt, COACH_TEMPERATURE))
        .await?;

    let status = if reply.is_success() {
        StatusCode::OK
    } else {
        StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY)
    };

    Ok((status, Json(reply.body)))
}
