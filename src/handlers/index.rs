use axum::response::IntoResponse;
use axum::Json;

// Static service descriptor, no side effects
pub async fn index_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "dashscope-gateway",
        "status": "running",
        "endpoints": {
            "chat": "POST /chat",
            "health": "GET /health",
            "metrics": "GET /metrics",
        }
    }))
}
