//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay requests by `outcome`
//!   (`success`, `http_error`, `connection_error`, `proxy_error`)
//! - `relay_upstream_duration_seconds` (histogram): time spent on the
//!   upstream exchange, by `outcome`
//!
//! Without a recorder installed the macros are no-ops, so recording is
//! unconditional and only exposition is opt-in.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Record one finished relay request.
pub fn record_relay(outcome: &'static str, start_time: Instant) {
    counter!("relay_requests_total", "outcome" => outcome).increment(1);
    histogram!("relay_upstream_duration_seconds", "outcome" => outcome)
        .record(start_time.elapsed().as_secs_f64());
}
