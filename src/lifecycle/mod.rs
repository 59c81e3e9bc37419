//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse args → Init logging → Load/validate config → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received (signals.rs) → trigger → stop accepting → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - In-flight upstream calls are not cancelled on shutdown

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
