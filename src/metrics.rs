use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("chat_requests_total", "Total number of /chat requests").unwrap();
    pub static ref QUOTA_REJECTIONS: Counter = register_counter!(
        "chat_quota_rejections_total",
        "Total requests rejected by the per-client quota"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES: Counter = register_counter!(
        "chat_upstream_failures_total",
        "Total failed upstream completion calls"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "chat_request_latency_seconds",
        "Upstream completion latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge = register_gauge!(
        "chat_tracked_clients",
        "Number of distinct client addresses tracked by the quota gate"
    )
    .unwrap();
}
