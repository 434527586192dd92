//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_commands_total` (counter): CLI invocations by method, outcome
//! - `gateway_command_duration_seconds` (histogram): invocation latency by method
//! - `gateway_requests_total` (counter): HTTP requests by endpoint, status
//!
//! Methods named by `/api/rpc` callers all share the `passthrough` label.
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record one CLI invocation.
pub fn record_command(method: &str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "gateway_commands_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "gateway_command_duration_seconds",
        "method" => method.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one HTTP request answered by the gateway.
pub fn record_request(endpoint: &str, status: u16) {
    metrics::counter!(
        "gateway_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
