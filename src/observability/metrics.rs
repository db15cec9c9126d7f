//! Metrics collection and exposition.
//!
//! # Metrics
//! - `bootstrap_requests_total` (counter): requests by branch, status
//! - `bootstrap_request_duration_seconds` (histogram): latency by branch
//! - `bootstrap_short_writes_total` (counter): bodies dropped before fully sent

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished request.
pub fn record_request(branch: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "bootstrap_requests_total",
        "branch" => branch,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("bootstrap_request_duration_seconds", "branch" => branch)
        .record(start.elapsed().as_secs_f64());
}

/// Record a response body that ended before all of it was sent.
pub fn record_short_write(kind: &'static str) {
    metrics::counter!("bootstrap_short_writes_total", "kind" => kind).increment(1);
}
