//! Relay subsystem: everything between the inbound query and the JSON the
//! client receives.
//!
//! # Data Flow
//! ```text
//! /api/bcentral?<query>
//!     → query.rs (decode, pick first values, apply defaults)
//!     → client.rs (encode six parameters, GET upstream, 30 s timeout)
//!     → Ok(body bytes)  or  error.rs (RelayError → {"error", "message"})
//! ```

pub mod client;
pub mod error;
pub mod query;

pub use client::{ClientError, UpstreamClient};
pub use error::{ErrorBody, RelayError};
pub use query::{QueryParams, SeriesQuery, DEFAULT_FUNCTION};

/// Path-and-query prefix that selects the relay over static files.
pub const RELAY_PREFIX: &str = "/api/bcentral?";

/// Whether a request target belongs to the relay endpoint.
///
/// The query separator is part of the prefix, so `/api/bcentral` alone is a
/// static file request.
pub fn is_relay_target(path_and_query: &str) -> bool {
    path_and_query.starts_with(RELAY_PREFIX)
}
