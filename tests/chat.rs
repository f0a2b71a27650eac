use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use dashscope_gateway::app;
use dashscope_gateway::config::Config;
use dashscope_gateway::state::AppState;

// Stand-in for the DashScope completion endpoint. Counts hits and answers
// with a fixed status and body.
#[derive(Clone)]
struct FakeUpstream {
    hits: Arc<AtomicUsize>,
    status: u16,
    body: serde_json::Value,
}

impl FakeUpstream {
    fn new(status: u16, body: serde_json::Value) -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            status,
            body,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn fake_completion(
    State(fake): State<FakeUpstream>,
) -> (StatusCode, Json<serde_json::Value>) {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::from_u16(fake.status).unwrap(),
        Json(fake.body.clone()),
    )
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

async fn serve_upstream(fake: FakeUpstream) -> SocketAddr {
    let router = Router::new()
        .route("/api/v1/apps/{app_id}/completion", post(fake_completion))
        .with_state(fake);
    serve(router).await
}

fn gateway_config(upstream: SocketAddr) -> Config {
    Config {
        port: 0,
        upstream_url: format!("http://{}", upstream),
        quota: 5,
        api_key: Some("sk-test".to_string()),
        app_id: Some("app-123".to_string()),
    }
}

async fn serve_gateway(config: Config) -> SocketAddr {
    let state = Arc::new(AppState::new(config));
    serve(app(state)).await
}

async fn post_chat(
    client: &reqwest::Client,
    gateway: SocketAddr,
    prompt: &str,
) -> (u16, serde_json::Value) {
    let response = client
        .post(format!("http://{}/chat", gateway))
        .json(&serde_json::json!({ "prompt": prompt }))
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    let body = response.json::<serde_json::Value>().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn first_chat_relays_reply_and_remaining() {
    let fake = FakeUpstream::new(200, serde_json::json!({ "output": { "text": "hello" } }));
    let upstream = serve_upstream(fake.clone()).await;
    let gateway = serve_gateway(gateway_config(upstream)).await;

    let client = reqwest::Client::new();
    let (status, body) = post_chat(&client, gateway, "hi").await;

    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({ "reply": "hello", "remaining": 4 }));
    assert_eq!(fake.hits(), 1);
}

#[tokio::test]
async fn quota_is_exhausted_after_five_requests() {
    let fake = FakeUpstream::new(200, serde_json::json!({ "output": { "text": "ok" } }));
    let upstream = serve_upstream(fake.clone()).await;
    let gateway = serve_gateway(gateway_config(upstream)).await;

    let client = reqwest::Client::new();
    for expected_remaining in (0..5).rev() {
        let (status, body) = post_chat(&client, gateway, "hi").await;
        assert_eq!(status, 200);
        assert_eq!(body["remaining"], expected_remaining);
    }

    // sixth and seventh calls are rejected without reaching upstream
    for _ in 0..2 {
        let (status, body) = post_chat(&client, gateway, "hi").await;
        assert_eq!(status, 429);
        assert_eq!(body, serde_json::json!({ "error": "request quota exceeded" }));
    }
    assert_eq!(fake.hits(), 5);
}

#[tokio::test]
async fn upstream_error_status_maps_to_server_error() {
    let fake = FakeUpstream::new(503, serde_json::json!({ "message": "overloaded" }));
    let upstream = serve_upstream(fake.clone()).await;
    let gateway = serve_gateway(gateway_config(upstream)).await;

    let client = reqwest::Client::new();
    let (status, body) = post_chat(&client, gateway, "hi").await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "server error");
    assert!(body["message"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn missing_reply_text_falls_back() {
    let fake = FakeUpstream::new(200, serde_json::json!({ "output": {} }));
    let upstream = serve_upstream(fake.clone()).await;
    let gateway = serve_gateway(gateway_config(upstream)).await;

    let client = reqwest::Client::new();
    let (status, body) = post_chat(&client, gateway, "hi").await;

    assert_eq!(status, 200);
    assert_eq!(body["reply"], "no reply content");
}

#[tokio::test]
async fn missing_credentials_short_circuit_before_upstream() {
    let fake = FakeUpstream::new(200, serde_json::json!({ "output": { "text": "ok" } }));
    let upstream = serve_upstream(fake.clone()).await;
    let mut config = gateway_config(upstream);
    config.api_key = None;
    let gateway = serve_gateway(config).await;

    let client = reqwest::Client::new();
    let (status, body) = post_chat(&client, gateway, "hi").await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "server configuration error");
    assert!(body["message"].as_str().unwrap().contains("DASHSCOPE"));
    assert_eq!(fake.hits(), 0);
}

#[tokio::test]
async fn health_reflects_configuration_presence() {
    let fake = FakeUpstream::new(200, serde_json::json!({}));
    let upstream = serve_upstream(fake).await;
    let mut config = gateway_config(upstream);
    config.app_id = None;
    let gateway = serve_gateway(config).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/health", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["env"]["has_api_key"], true);
    assert_eq!(body["env"]["has_app_id"], false);
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn index_lists_service_endpoints() {
    let fake = FakeUpstream::new(200, serde_json::json!({}));
    let upstream = serve_upstream(fake).await;
    let gateway = serve_gateway(gateway_config(upstream)).await;

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/", gateway))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["service"], "dashscope-gateway");
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["chat"], "POST /chat");
}
