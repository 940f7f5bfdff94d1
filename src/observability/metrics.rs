//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pinger_requests_total` (counter): requests by method and status
//! - `pinger_request_duration_seconds` (histogram): handler latency
//! - `pinger_documents_inserted_total` (counter): successful inserts by collection
//! - `pinger_insert_failures_total` (counter): failed inserts by collection
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "pinger_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("pinger_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the result of one insert.
pub fn record_insert(collection: &'static str, ok: bool) {
    if ok {
        counter!("pinger_documents_inserted_total", "collection" => collection).increment(1);
    } else {
        counter!("pinger_insert_failures_total", "collection" => collection).increment(1);
    }
}
