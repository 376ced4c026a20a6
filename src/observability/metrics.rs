//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, status, branch
//! - `proxy_request_duration_seconds` (histogram): latency distribution
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - The `branch` label separates download traffic from site traffic
//! - Recording without an installed exporter is a no-op, so the handler
//!   path never checks whether metrics are enabled

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "proxy_requests_total",
                "Total requests by method, status, and branch"
            );
            describe_histogram!(
                "proxy_request_duration_seconds",
                "Request handling latency in seconds"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, branch: &'static str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("branch", branch.to_string()),
    ];
    counter!("proxy_requests_total", &labels).increment(1);
    histogram!("proxy_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}
