use crate::error::RelayError;
use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{PeerId, ServerEvent};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, warn};

#[derive(Default)]
struct SignalingInner {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
}

/// Table of live WebSocket connections, keyed by peer id.
///
/// Each entry is the outbound queue drained by that socket's writer task.
#[derive(Clone, Default)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.inner.peers.remove(peer_id);
    }

    pub fn is_connected(&self, peer_id: &PeerId) -> bool {
        self.inner.peers.contains_key(peer_id)
    }

    pub fn connected_count(&self) -> usize {
        self.inner.peers.len()
    }

    /// Queue an event on the peer's socket. `false` if the peer is gone.
    pub fn push(&self, peer_id: &PeerId, event: &ServerEvent) -> bool {
        let Some(peer) = self.inner.peers.get(peer_id) else {
            return false;
        };

        let msg = match encode(event) {
            Ok(msg) => msg,
            Err(e) => {
                error!("Failed to serialize server event: {}", e);
                return false;
            }
        };

        if let Err(e) = peer.send(msg) {
            warn!("Failed to queue WS message for {}: {}", peer_id, e);
            return false;
        }
        true
    }
}

/// Serialise an event into the text frame the socket writer sends.
pub fn encode(event: &ServerEvent) -> Result<Message, RelayError> {
    let json = event.to_json()?;
    Ok(Message::Text(json.into()))
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_event(&self, peer_id: &PeerId, event: ServerEvent) -> bool {
        self.push(peer_id, &event)
    }
}
