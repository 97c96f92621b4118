//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_requests_total` (counter): requests by method, status
//! - `api_request_duration_seconds` (histogram): latency distribution
//! - `upstream_fetch_total` (counter): feed fetches by outcome
//! - `upstream_fetch_duration_seconds` (histogram): feed fetch latency
//! - `auth_rejections_total` (counter): requests refused by the API key gate

use std::net::SocketAddr;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    ::metrics::counter!("api_requests_total", &labels).increment(1);
    ::metrics::histogram!("api_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record one upstream feed fetch.
pub fn record_upstream_fetch(outcome: &'static str, start: Instant) {
    ::metrics::counter!("upstream_fetch_total", "outcome" => outcome).increment(1);
    ::metrics::histogram!("upstream_fetch_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request refused by the authorization gate.
pub fn record_auth_rejection() {
    ::metrics::counter!("auth_rejections_total").increment(1);
}

/// Middleware counting every request that reaches the router.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), start);
    response
}
