use std::process::ExitCode;

use bcentral_relay::config::{load_config, CliArgs};
use bcentral_relay::lifecycle::{signals, Shutdown};
use bcentral_relay::observability::{logging, metrics};
use bcentral_relay::{RelayServer, StartupError};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init_tracing(&args.log_level);

    tracing::info!("bcentral-relay v{} starting", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<(), StartupError> {
    let config = load_config(args)?;

    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        upstream_timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_address {
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(metrics_address = %addr, error = %e, "Failed to start metrics exporter");
        }
    }

    let server = RelayServer::new(config)?;
    let listener = server.bind().await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await
}
