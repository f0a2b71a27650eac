use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;

use dashscope_gateway::app;
use dashscope_gateway::config::{Args, Config};
use dashscope_gateway::state::AppState;

#[tokio::main]
async fn main() {
    // parse cli arguments and read credentials from the environment
    let args = Args::parse();
    let config = Config::from_args(&args);

    println!(
        "Environment check: has_api_key={}, has_app_id={}",
        config.has_api_key(),
        config.has_app_id()
    );

    let state = Arc::new(AppState::new(config));
    let router = app(state.clone());

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    println!("Gateway running on http://localhost:{}", state.config.port);
    println!("Forwarding to DashScope at {}", state.config.upstream_url);
    println!(
        "Quota: {} chat requests per client for the process lifetime",
        state.config.quota
    );

    // connect info is needed to key the quota by remote address
    if let Err(e) = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
