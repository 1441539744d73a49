use std::net::SocketAddr;
use thiserror::Error;

/// Errors surfaced by the relay library.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The router task is no longer accepting commands.
    #[error("Room router is not running")]
    RelayClosed,

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
