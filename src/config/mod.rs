//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line
//!     → loader.rs (clap parse, port fallback)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc with the HTTP layer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults reproducing the stock relay
//! - Validation separates syntactic (clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_port, CliArgs, ConfigError};
pub use schema::{
    ListenerConfig, ObservabilityConfig, RelayConfig, ResponseConfig, StaticFilesConfig,
    UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
