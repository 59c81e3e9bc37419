//! CORS relay for the Banco Central de Chile time-series API.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::schema::RelayConfig;
pub use error::StartupError;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
