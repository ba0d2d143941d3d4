//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_auth_attempts_total` (counter): authentication decisions by
//!   surface (`http`/`ws`) and outcome
//! - `gateway_sessions_active` (gauge): currently connected sessions
//! - `gateway_sessions_total` (counter): sessions accepted since start

use std::net::SocketAddr;

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its exposition endpoint.
///
/// Served on its own address so the scrape surface stays off the
/// client-facing listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    describe_counter!(
        "gateway_auth_attempts_total",
        "Authentication decisions by surface and outcome"
    );
    describe_gauge!("gateway_sessions_active", "Currently connected sessions");
    describe_counter!("gateway_sessions_total", "Sessions accepted since start");

    tracing::info!(address = %addr, "Metrics exporter started");
    Ok(())
}

/// Record one authentication decision. Only the outcome is recorded, never
/// anything derived from the credential itself.
pub fn record_auth_attempt(surface: &'static str, outcome: &'static str) {
    counter!("gateway_auth_attempts_total", "surface" => surface, "outcome" => outcome)
        .increment(1);
}

pub fn record_session_opened() {
    counter!("gateway_sessions_total").increment(1);
    gauge!("gateway_sessions_active").increment(1.0);
}

pub fn record_session_closed() {
    gauge!("gateway_sessions_active").decrement(1.0);
}
