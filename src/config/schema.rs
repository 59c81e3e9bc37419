//! Configuration schema definitions.
//!
//! This module defines the complete runtime configuration of the relay.
//! All types derive Serde traits so a resolved configuration can be logged
//! or dumped; every field has a default reproducing the stock behavior.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Port used when none is given, or when the given one is not a number.
pub const DEFAULT_PORT: u16 = 8001;

/// Time-series web service the relay forwards to.
pub const DEFAULT_UPSTREAM_URL: &str = "https://si3.bcentral.cl/SieteRestWS/SieteRestWS.ashx";

/// User-Agent presented to the upstream service.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Datos para Chile Proxy)";

/// Upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Upstream API settings.
    pub upstream: UpstreamConfig,

    /// Static file serving.
    pub static_files: StaticFilesConfig,

    /// How relay outcomes are reported to the client.
    pub responses: ResponseConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// IP literal to bind (e.g., "0.0.0.0", "127.0.0.1", "::").
    pub host: String,

    /// TCP port; 0 lets the OS choose.
    pub port: u16,
}

impl ListenerConfig {
    /// Resolve host and port into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL; the six series parameters replace its query string.
    pub base_url: String,

    /// User-Agent header sent upstream.
    pub user_agent: String,

    /// Total request timeout in seconds.
    pub timeout_secs: u64,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` for the upstream call.
    pub system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            system_proxy: true,
        }
    }
}

/// Static file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory served for every non-relay request.
    pub root: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

/// Response status handling for relay requests.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResponseConfig {
    /// When false every relay response is 200 and failures are only visible
    /// in the JSON body. When true the status reflects the failure.
    pub strict_status: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Prometheus scrape endpoint; metrics are not exported when absent.
    pub metrics_address: Option<SocketAddr>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
