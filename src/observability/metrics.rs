//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): backend dispatches by resource, operation, status
//! - `gateway_request_duration_seconds` (histogram): backend call latency
//!
//! Without an installed recorder the macros are no-ops, so tests and
//! deployments with metrics disabled pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::services::{Operation, ResourceKind};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one dispatched backend call.
pub fn record_dispatch(kind: ResourceKind, operation: Operation, status: u16, started: Instant) {
    metrics::counter!(
        "gateway_requests_total",
        "resource" => kind.name(),
        "operation" => operation.name(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "gateway_request_duration_seconds",
        "resource" => kind.name(),
        "operation" => operation.name()
    )
    .record(started.elapsed().as_secs_f64());
}
