use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Liveness only; never touches the upstream API.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}
