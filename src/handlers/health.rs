use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use crate::state::AppState;

// Health handler: liveness plus presence of the required configuration
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "env": {
            "has_api_key": state.config.has_api_key(),
            "has_app_id": state.config.has_app_id(),
        }
    }))
}
