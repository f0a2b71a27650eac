use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod quota;
pub mod state;
pub mod upstream;

use crate::state::AppState;

// Build the router with all routes wired to the shared state
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/health", get(handlers::health_handler))
        .route("/chat", post(handlers::chat_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
