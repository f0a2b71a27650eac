use crate::config::Config;
use crate::quota::QuotaGate;
use crate::upstream::UpstreamClient;

// App's shared state, constructed once at startup and handed to every handler
pub struct AppState {
    pub config: Config,
    pub quota: QuotaGate,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let quota = QuotaGate::new(config.quota);
        let upstream = UpstreamClient::new(config.upstream_url.clone());
        Self {
            config,
            quota,
            upstream,
        }
    }
}
