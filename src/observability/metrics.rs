//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_upstream_failures_total` (counter): dispatch failures by route

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own bind address.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
            metrics::describe_counter!(
                "gateway_requests_total",
                "Total requests handled, by method, route, and status"
            );
            metrics::describe_histogram!(
                "gateway_request_duration_seconds",
                "End-to-end request latency in seconds"
            );
            metrics::describe_counter!(
                "gateway_upstream_failures_total",
                "Upstream dispatch failures, by route"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one completed request. No-op when no exporter is installed.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream dispatch failure.
pub fn record_upstream_failure(route: &str) {
    metrics::counter!(
        "gateway_upstream_failures_total",
        "route" => route.to_string()
    )
    .increment(1);
}
