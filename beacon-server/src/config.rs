use crate::error::RelayError;
use std::net::SocketAddr;

/// Runtime settings for [`RelayServer`](crate::RelayServer).
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// HTTP path that upgrades to the relay WebSocket.
    pub socket_path: String,
    /// Capacity of the socket → router command queue.
    pub command_buffer: usize,
    /// Answer CORS preflights for any origin.
    pub allow_any_origin: bool,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            socket_path: "/api/socket".to_owned(),
            command_buffer: 256,
            allow_any_origin: true,
        }
    }
}

impl RelayConfig {
    pub fn validate(&self) -> Result<(), RelayError> {
        if !self.socket_path.starts_with('/') || self.socket_path == "/health" {
            return Err(RelayError::InvalidConfig(format!(
                "socket path {:?} must start with '/' and not be /health",
                self.socket_path
            )));
        }
        if self.command_buffer == 0 {
            return Err(RelayError::InvalidConfig(
                "command buffer must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
