pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/match", post(handlers::handle_match))
        .route(
            "/api/v1/resumes/suggestions",
            post(handlers::handle_suggestions),
        )
        .with_state(state)
}
