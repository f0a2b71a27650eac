use clap::Parser;
use std::env;

use crate::error::ProxyError;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "dashscope-gateway")]
#[command(about = "Quota-gated proxy for the DashScope apps completion API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Base URL of the DashScope API
    #[arg(short, long, default_value = "https://dashscope.aliyuncs.com")]
    pub upstream_url: String,

    // Max chat requests allowed per client for the process lifetime
    #[arg(short, long, default_value_t = 5)]
    pub quota: u32,
}

// Resolved runtime configuration. Credentials come from the environment
// once at startup; their absence is reported per request, not at boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub quota: u32,
    pub api_key: Option<String>,
    pub app_id: Option<String>,
}

// Borrowed view of the credentials once both are known to be present
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub api_key: &'a str,
    pub app_id: &'a str,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            port: args.port,
            upstream_url: args.upstream_url.trim_end_matches('/').to_string(),
            quota: args.quota,
            api_key: env::var("DASHSCOPE_API_KEY").ok().filter(|v| !v.is_empty()),
            app_id: env::var("DASHSCOPE_APP_ID").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn has_app_id(&self) -> bool {
        self.app_id.is_some()
    }

    // Both credentials or a configuration error, checked before any upstream call
    pub fn credentials(&self) -> Result<Credentials<'_>, ProxyError> {
        match (self.api_key.as_deref(), self.app_id.as_deref()) {
            (Some(api_key), Some(app_id)) => Ok(Credentials { api_key, app_id }),
            _ => Err(ProxyError::Configuration),
        }
    }
}
