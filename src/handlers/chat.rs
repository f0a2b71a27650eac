use axum::extract::{ConnectInfo, State};
use axum::Json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ProxyError;
use crate::metrics::{QUOTA_REJECTIONS, REQUEST_LATENCY, REQUEST_TOTAL, TRACKED_CLIENTS, UPSTREAM_FAILURES};
use crate::models::{ChatReply, ChatRequest};
use crate::state::AppState;

// POST /chat handler: config check, admission gate, then one upstream call.
// Every path is terminal; failures are mapped to JSON by ProxyError.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ProxyError> {
    REQUEST_TOTAL.inc();

    let client_id = addr.ip().to_string();
    println!(
        "[Chat] request from {} (prompt: {} bytes)",
        client_id,
        payload.prompt.len()
    );

    // no upstream call and no counter mutation without credentials
    let creds = state.config.credentials()?;

    let admission = state.quota.check_and_increment(&client_id);
    TRACKED_CLIENTS.set(state.quota.tracked_clients() as f64);
    if !admission.allowed {
        QUOTA_REJECTIONS.inc();
        return Err(ProxyError::QuotaExceeded);
    }

    let start_time = Instant::now();
    let result = state.upstream.complete(creds, &payload.prompt).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    match result {
        Ok(reply) => Ok(Json(ChatReply {
            reply,
            remaining: admission.remaining,
        })),
        Err(e) => {
            UPSTREAM_FAILURES.inc();
            eprintln!("[Chat] upstream call failed: {}", e);
            Err(e)
        }
    }
}
