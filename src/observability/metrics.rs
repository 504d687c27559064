//! Metrics collection and exposition.
//!
//! # Metrics
//! - `edge_router_cache_lookups_total` (counter): by outcome `hit`/`miss`
//! - `edge_router_store_fetches_total` (counter): by outcome `ok`/`error`
//! - `edge_router_decisions_total` (counter): by decision
//!   `forwarded`/`rejected_missing`/`rejected_empty`/`rejected_unresolved`
//!
//! # Design Decisions
//! - Counters only; this component has no interesting latency of its own
//!   beyond the store scan, which the scan timeout already bounds
//! - Recording is a no-op until `init_metrics` installs the exporter, so
//!   library users and tests pay nothing

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a cache lookup outcome (`hit` or `miss`).
pub fn record_cache_lookup(outcome: &'static str) {
    metrics::counter!("edge_router_cache_lookups_total", "outcome" => outcome).increment(1);
}

/// Record a mapping store fetch outcome (`ok` or `error`).
pub fn record_store_fetch(outcome: &'static str) {
    metrics::counter!("edge_router_store_fetches_total", "outcome" => outcome).increment(1);
}

/// Record the handler's decision for one request.
pub fn record_decision(decision: &'static str) {
    metrics::counter!("edge_router_decisions_total", "decision" => decision).increment(1);
}
