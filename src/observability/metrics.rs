//! Metrics collection and exposition.
//!
//! # Metrics
//! - `portal_navigations_total` (counter): router navigations by kind, route
//! - `portal_requests_total` (counter): HTTP page requests by route, status
//! - `portal_request_duration_seconds` (histogram): page render latency
//!
//! Unmatched locations are labelled `route="none"`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

const NO_ROUTE: &str = "none";

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_navigation(kind: &str, route: Option<&str>) {
    ::metrics::counter!(
        "portal_navigations_total",
        "kind" => kind.to_string(),
        "route" => route.unwrap_or(NO_ROUTE).to_string()
    )
    .increment(1);
}

pub fn record_request(route: Option<&str>, status: u16, start: Instant) {
    let route = route.unwrap_or(NO_ROUTE).to_string();
    ::metrics::counter!(
        "portal_requests_total",
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("portal_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}
