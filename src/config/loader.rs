//! Configuration loading from the command line.
//!
//! The relay reads no config files and no environment variables of its own;
//! everything comes from `CliArgs`, whose defaults reproduce the stock relay.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::schema::{
    ListenerConfig, ObservabilityConfig, RelayConfig, ResponseConfig, StaticFilesConfig,
    UpstreamConfig, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_UPSTREAM_URL, DEFAULT_USER_AGENT,
};
use crate::config::validation::{validate_config, ValidationError};

/// Command-line arguments of the relay binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "bcentral-relay")]
#[command(version, about = "CORS relay for the Banco Central time-series API", long_about = None)]
pub struct CliArgs {
    /// Port to listen on. Anything that is not a valid port falls back to 8001.
    #[arg(allow_hyphen_values = true)]
    pub port: Option<String>,

    /// Trailing positional arguments; accepted and ignored.
    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// IP address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Directory served for non-relay requests.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Upstream base URL.
    #[arg(long, default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream: String,

    /// Upstream timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Report relay failures through the HTTP status instead of always 200.
    #[arg(long)]
    pub strict_status: bool,

    /// Expose Prometheus metrics on this address (e.g. 127.0.0.1:9090).
    #[arg(long)]
    pub metrics_addr: Option<SocketAddr>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve the positional port argument.
///
/// Missing or unparseable input yields `DEFAULT_PORT`; the latter is logged.
pub fn parse_port(arg: Option<&str>) -> u16 {
    let Some(raw) = arg else {
        return DEFAULT_PORT;
    };
    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(e) => {
            tracing::warn!(
                argument = %raw,
                error = %e,
                default_port = DEFAULT_PORT,
                "Invalid port argument, using default"
            );
            DEFAULT_PORT
        }
    }
}

/// Build and validate configuration from parsed arguments.
pub fn load_config(args: CliArgs) -> Result<RelayConfig, ConfigError> {
    if !args.extra.is_empty() {
        tracing::warn!(ignored = ?args.extra, "Ignoring extra positional arguments");
    }

    let config = RelayConfig {
        listener: ListenerConfig {
            host: args.host,
            port: parse_port(args.port.as_deref()),
        },
        upstream: UpstreamConfig {
            base_url: args.upstream,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: args.timeout,
            system_proxy: true,
        },
        static_files: StaticFilesConfig { root: args.root },
        responses: ResponseConfig {
            strict_status: args.strict_status,
        },
        observability: ObservabilityConfig {
            log_level: args.log_level,
            metrics_address: args.metrics_addr,
        },
    };

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
