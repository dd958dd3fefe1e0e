use std::sync::Arc;

use crate::cors::OriginPolicy;
use crate::llm_client::ChatCompletions;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Upstream model backend. `OpenAiClient` in production, a mock in tests.
    pub llm: Arc<dyn ChatCompletions>,
    pub origins: Arc<OriginPolicy>,
}
