use async_trait::async_trait;
use beacon_core::{PeerId, ServerEvent};

/// Outbound side of the relay: whatever owns the live connections.
///
/// The router only talks to peers through this trait, so it can be driven
/// without real sockets.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Push an event to one peer.
    ///
    /// Returns `false` when no live connection has that id. Delivery is
    /// fire-and-forget: `true` means queued, not received.
    async fn send_event(&self, peer_id: &PeerId, event: ServerEvent) -> bool;
}
