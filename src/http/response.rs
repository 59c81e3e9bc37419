//! Relay response construction.
//!
//! # Responsibilities
//! - Wrap upstream bytes verbatim as `application/json`
//! - Render `RelayError` as the JSON error body
//! - Pick the status: always 200 in compatible mode, failure-specific in
//!   strict mode
//!
//! The upstream content type is not forwarded; relay responses are always
//! labelled JSON.

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::relay::RelayError;

pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// Build the client response for a relay outcome.
pub fn relay_response(result: Result<Bytes, RelayError>, strict_status: bool) -> Response {
    let (status, body) = match result {
        Ok(bytes) => (StatusCode::OK, bytes),
        Err(err) => {
            let status = if strict_status {
                err.status()
            } else {
                StatusCode::OK
            };
            let body = match err.body().to_json() {
                Ok(json) => Bytes::from(json),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize error body");
                    Bytes::new()
                }
            };
            (status, body)
        }
    };

    (status, [(header::CONTENT_TYPE, APPLICATION_JSON)], body).into_response()
}
