//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap and serde handle syntax)
//! - Check the bind host parses
//! - Check the upstream base URL is absolute http(s)
//! - Check the static root is an existing directory
//!
//! Returns all validation errors, not just the first.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind host {host:?}: {reason}")]
    BindHost { host: String, reason: String },

    #[error("invalid upstream URL {url:?}: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error("upstream URL must use http or https, got {0:?}")]
    UpstreamScheme(String),

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("static root {} is not a directory", .0.display())]
    StaticRoot(PathBuf),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.socket_addr() {
        errors.push(ValidationError::BindHost {
            host: config.listener.host.clone(),
            reason: e.to_string(),
        });
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::UpstreamScheme(url.scheme().to_string())),
        Err(e) => errors.push(ValidationError::UpstreamUrl {
            url: config.upstream.base_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if !config.static_files.root.is_dir() {
        errors.push(ValidationError::StaticRoot(config.static_files.root.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
