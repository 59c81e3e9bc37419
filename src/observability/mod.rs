//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup and relay events
//!     → logging.rs (tracing subscriber, stdout)
//!     → metrics.rs (counters, histograms, optional Prometheus endpoint)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event; the request ID ties events together
//! - Metrics recording is always on, exposition only with `--metrics-addr`

pub mod logging;
pub mod metrics;
