//! Axum route handler for the feedback coaching endpoint.

use axum::{extract::State, Json};
use tracing::debug;

use crate::errors::AppError;
use crate::feedback::composer::compose_prompts;
use crate::feedback::models::{AskRequest, AskResponse};
use crate::feedback::persona::persona_for;
use crate::feedback::validation::validate_feedback_request;
use crate::llm_client::{complete_text, ChatRequest};
use crate::state::AppState;

/// POST /api/ask
///
/// Validate → persona → compose → one upstream call → trimmed text.
/// A missing or unparseable body is treated as `{}`.
pub async fn handle_ask(
    State(state): State<AppState>,
    payload: Option<Json<AskRequest>>,
) -> Result<Json<AskResponse>, AppError> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();
    let request = validate_feedback_request(body)?;

    let persona = persona_for(&request.employee_name);
    let bundle = compose_prompts(&request, persona);

    debug!(
        "Composed feedback prompt: review_type={:?} framework={:?} persona={}",
        request.review_type,
        request.framework,
        !persona.is_empty()
    );

    let chat = ChatRequest::with_system(
        bundle.system_instruction,
        bundle.user_instruction,
        request.review_type.temperature(),
        request.review_type.max_tokens(),
    );

    let response = complete_text(state.llm.as_ref(), &chat).await?;

    Ok(Json(AskResponse { response }))
}
