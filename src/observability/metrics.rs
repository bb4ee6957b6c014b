//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by endpoint, status
//! - `gateway_request_duration_seconds` (histogram): latency by endpoint
//! - `gateway_poll_attempts` (histogram): probes spent per status poll
//! - `gateway_polls_total` (counter): polls by resolution

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its scrape address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(endpoint: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!(
        "gateway_request_duration_seconds",
        "endpoint" => endpoint.to_string(),
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a finished status poll and how many probes it spent.
pub fn record_poll(attempts: u32, resolved: bool) {
    metrics::histogram!("gateway_poll_attempts").record(attempts as f64);
    metrics::counter!(
        "gateway_polls_total",
        "resolution" => if resolved { "terminal" } else { "pending" },
    )
    .increment(1);
}
