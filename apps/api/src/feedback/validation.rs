//! Request validation for the typed JSON bodies.
//!
//! Only the primary text field is required. Every other field falls back to
//! its default when absent, blank, or of the wrong JSON type.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::coach::models::CoachRequest;
use crate::errors::AppError;
use crate::feedback::models::{AskRequest, FeedbackRequest, FrameworkPreference, ReviewType};

pub const MISSING_INPUT: &str = "Missing input";
pub const MISSING_PROMPT: &str = "Missing prompt";

/// Serde helper: a JSON string becomes `Some`, any other value becomes `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Serde helper: keeps the string elements of a JSON array; anything else is empty.
pub fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Returns the text if it is non-blank. The value is returned untrimmed.
pub fn required_text(text: Option<String>, message: &str) -> Result<String, AppError> {
    text.filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

fn optional_text(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Validates an `/api/ask` body. Fails only when `input` is unusable.
pub fn validate_feedback_request(body: AskRequest) -> Result<FeedbackRequest, AppError> {
    let draft_text = required_text(body.input, MISSING_INPUT)?;

    let mut request = FeedbackRequest::new(draft_text);
    if let Some(name) = optional_text(body.name) {
        request.manager_name = name;
    }
    if let Some(employee) = optional_text(body.employee) {
        request.employee_name = employee;
    }
    if let Some(review_type) = optional_text(body.review_type) {
        request.review_type = ReviewType::parse(&review_type);
    }
    if let Some(framework) = optional_text(body.framework_preference) {
        request.framework = FrameworkPreference::parse(&framework);
    }
    request.scenario_id = optional_text(body.scenario_id);
    // Guidelines are authored text: whitespace and line breaks are kept as sent.
    request.module_guidelines = body.module_guidelines.filter(|g| !g.trim().is_empty());
    request.competencies = body
        .competencies
        .into_iter()
        .filter_map(|c| optional_text(Some(c)))
        .collect();

    Ok(request)
}

/// Validates an `/api/coach` body and returns the prompt.
pub fn validate_coach_prompt(body: CoachRequest) -> Result<String, AppError> {
    required_text(body.prompt, MISSING_PROMPT)
}
