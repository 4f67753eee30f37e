pub mod health;
pub mod page;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::followup::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/followups", post(handlers::handle_generate))
        .route(
            "/api/v1/followups/:id",
            get(handlers::handle_get_session).delete(handlers::handle_end_session),
        )
        .route(
            "/api/v1/followups/:id/recipient",
            put(handlers::handle_update_recipient),
        )
        .route("/api/v1/followups/:id/send", post(handlers::handle_live_send))
        .route(
            "/api/v1/followups/:id/mock-send",
            post(handlers::handle_mock_send),
        )
        .with_state(state)
}
