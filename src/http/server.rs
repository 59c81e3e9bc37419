//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all dispatcher
//! - Wire up middleware (preflight, CORS headers, request ID, tracing)
//! - Serve on a bound listener until the shutdown future resolves

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::header,
    middleware,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::error::StartupError;
use crate::http::cors::{self, preflight_middleware};
use crate::http::handlers::dispatch;
use crate::relay::UpstreamClient;

/// How long in-flight requests may run once shutdown has been requested.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub static_files: ServeDir,
    pub strict_status: bool,
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl RelayServer {
    /// Create a new server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, StartupError> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        let state = AppState {
            upstream,
            static_files: ServeDir::new(&config.static_files.root),
            strict_status: config.responses.strict_status,
        };

        let router = Self::build_router(state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: the request ID is assigned first, and the
    /// CORS headers wrap the preflight short-circuit so OPTIONS answers
    /// carry them too.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(middleware::from_fn(preflight_middleware))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                cors::ALLOW_ORIGIN,
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                cors::ALLOW_METHODS,
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                cors::ALLOW_HEADERS,
            ))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, StartupError> {
        let addr: SocketAddr = self.config.listener.socket_addr()?;
        TcpListener::bind(addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })
    }

    /// Run the server, accepting connections until `shutdown` resolves.
    ///
    /// Requests still in flight get `SHUTDOWN_GRACE` to finish; after that
    /// `run` returns without waiting for them.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(StartupError::Serve)?;
        tracing::info!(
            address = %addr,
            relay_endpoint = %format!("http://{addr}/api/bcentral"),
            static_root = %self.config.static_files.root.display(),
            upstream = %self.config.upstream.base_url,
            strict_status = self.config.responses.strict_status,
            "Relay server starting"
        );

        let (stopping_tx, mut stopping_rx) = watch::channel(false);
        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                let _ = stopping_tx.send(true);
            })
            .into_future();
        let grace = async move {
            if stopping_rx.wait_for(|stopping| *stopping).await.is_err() {
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(SHUTDOWN_GRACE).await;
        };

        tokio::select! {
            result = serve => result.map_err(StartupError::Serve)?,
            () = grace => {
                tracing::warn!(
                    grace_secs = SHUTDOWN_GRACE.as_secs(),
                    "Shutdown grace period elapsed, abandoning in-flight requests"
                );
            }
        }

        tracing::info!("Relay server stopped");
        Ok(())
    }
}
