//! Startup and serve errors. Any of these ends the process.

use std::io;
use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;

use crate::config::ConfigError;
use crate::relay::ClientError;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("invalid bind address: {0}")]
    Address(#[from] AddrParseError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}
