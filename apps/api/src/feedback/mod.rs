// Feedback coaching: validation, persona lookup, rubric selection, prompt composition.
// All upstream calls go through llm_client.

pub mod composer;
pub mod handlers;
pub mod models;
pub mod persona;
pub mod prompts;
pub mod rubric;
pub mod validation;
