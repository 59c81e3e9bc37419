//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one task each, axum::serve)
//!     → server.rs (request ID, tracing, CORS headers)
//!     → cors.rs (OPTIONS answered here)
//!     → handlers.rs (relay target? → relay : ServeDir)
//!     → response.rs (relay outcome → JSON response)
//!     → Send to client
//! ```

pub mod cors;
pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, RelayServer, SHUTDOWN_GRACE};
