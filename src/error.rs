use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// Fixed user-visible message for quota rejections
pub const QUOTA_EXCEEDED_MESSAGE: &str = "request quota exceeded";

// Everything that can go wrong on the /chat path. All variants are mapped
// to a JSON error body at the handler boundary; none crash the process.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("missing DASHSCOPE_API_KEY or DASHSCOPE_APP_ID environment variable")]
    Configuration,

    #[error("request quota exceeded")]
    QuotaExceeded,

    // Upstream answered with a non-success status; body is best-effort
    #[error("upstream error: status {status}: {body}")]
    Upstream { status: u16, body: String },

    // Transport-level failure reaching upstream (DNS, refused, timeout)
    #[error("network error: {0}")]
    Network(String),

    // Upstream body could not be decoded at all
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyError::QuotaExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                serde_json::json!({ "error": QUOTA_EXCEEDED_MESSAGE }),
            ),
            ProxyError::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": "server configuration error",
                    "message": self.to_string(),
                }),
            ),
            ProxyError::Upstream { .. } | ProxyError::Network(_) | ProxyError::Malformed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "error": "server error",
                    "message": self.to_string(),
                }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
