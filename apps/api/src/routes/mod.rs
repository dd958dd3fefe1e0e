pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::coach::handlers::handle_coach;
use crate::cors::reject_disallowed_origin;
use crate::feedback::handlers::handle_ask;
use crate::state::AppState;

/// Routes plus the origin policy. The origin check is the outermost layer so
/// disallowed requests never reach CORS preflight handling or any handler.
pub fn build_router(state: AppState) -> Router {
    let origins = state.origins.clone();
    let cors = origins.cors_layer();

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/coach", post(handle_coach))
        .route("/api/ask", post(handle_ask))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn_with_state(origins, reject_disallowed_origin))
}
