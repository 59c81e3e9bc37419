//! Upstream client.
//!
//! One `reqwest::Client` is built at startup and cloned into every request
//! (clones share the connection pool). The timeout bounds connecting and
//! each individual read, not the whole exchange, so a slow but steady body
//! still completes.

use std::time::Duration;

use axum::body::Bytes;
use url::Url;

use crate::config::UpstreamConfig;
use crate::relay::error::{root_cause, RelayError};
use crate::relay::query::SeriesQuery;

/// Error type for building the upstream client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Handle for issuing series requests to the upstream service.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)?;
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(config.timeout_secs))
            .read_timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch a series and return the upstream body untouched.
    pub async fn fetch(&self, query: &SeriesQuery) -> Result<Bytes, RelayError> {
        let url = query.upstream_url(&self.base_url);

        tracing::info!(
            url = %query.redacted().upstream_url(&self.base_url),
            "Relaying request upstream"
        );

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::from_send(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Http {
                code: status.as_u16(),
                reason: reason_phrase(&response),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| RelayError::Proxy(root_cause(&e)))
    }
}

/// Reason phrase as sent on the wire.
///
/// hyper only records the phrase when it differs from the canonical one, so
/// the canonical phrase is the fallback.
fn reason_phrase(response: &reqwest::Response) -> String {
    match response.extensions().get::<hyper::ext::ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => response
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
