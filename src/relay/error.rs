//! Relay failure taxonomy and its JSON rendering.
//!
//! Every failure is caught at the handler boundary and written to the
//! client as `{"error": "<kind>", "message": "<detail>"}`.

use std::error::Error as StdError;
use std::io;

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Why a relay request did not produce upstream data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// Upstream answered with a non-2xx status.
    #[error("HTTP {code}")]
    Http { code: u16, reason: String },

    /// Upstream could not be reached (DNS, refused, timed out).
    #[error("Connection Error")]
    Connection { message: String, timed_out: bool },

    /// Anything else that went wrong while relaying.
    #[error("Proxy Error")]
    Proxy(String),
}

impl RelayError {
    /// Classify a failure from sending the upstream request.
    pub fn from_send(err: &reqwest::Error) -> Self {
        if err.is_builder() || err.is_redirect() {
            return RelayError::Proxy(root_cause(err));
        }
        RelayError::Connection {
            message: root_cause(err),
            timed_out: err.is_timeout(),
        }
    }

    /// Detail text for the `message` field.
    pub fn message(&self) -> &str {
        match self {
            RelayError::Http { reason, .. } => reason,
            RelayError::Connection { message, .. } => message,
            RelayError::Proxy(message) => message,
        }
    }

    /// Status used when failures are reported through the HTTP status.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Http { code, .. } => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::Connection { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Connection { .. } => StatusCode::BAD_GATEWAY,
            RelayError::Proxy(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            RelayError::Http { .. } => "http_error",
            RelayError::Connection { .. } => "connection_error",
            RelayError::Proxy(_) => "proxy_error",
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            message: self.message().to_string(),
        }
    }
}

/// Innermost error in a source chain, which carries the human-readable reason
/// (e.g. "Connection refused (os error 111)") rather than reqwest's wrapper text.
pub fn root_cause(err: &(dyn StdError + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// JSON payload written for relay failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    /// Serialize with `", "` and `": "` separators.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), SpacedFormatter);
        self.serialize(&mut serializer)?;
        Ok(serializer.into_inner())
    }
}

/// Compact single-line JSON with a space after each separator.
struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
