use crate::signaling::SignalingOutput;
use beacon_core::{Payload, PeerId, ServerEvent};
use std::sync::Arc;
use tracing::debug;

/// Targeted delivery on top of a [`SignalingOutput`].
#[derive(Clone)]
pub struct PeerChannel {
    output: Arc<dyn SignalingOutput>,
}

impl PeerChannel {
    pub fn new(output: Arc<dyn SignalingOutput>) -> Self {
        Self { output }
    }

    /// Relay `data` from one peer to another.
    ///
    /// Any live id may be targeted, whatever room it is in. Unknown targets
    /// are dropped without telling the sender.
    pub async fn signal(&self, from: &PeerId, to: &PeerId, data: Payload) -> bool {
        let event = ServerEvent::Signal {
            from: from.clone(),
            data,
        };

        let delivered = self.output.send_event(to, event).await;
        if !delivered {
            debug!(%from, %to, "Dropping signal for unknown peer");
        }
        delivered
    }

    pub async fn deliver(&self, peer_id: &PeerId, event: ServerEvent) -> bool {
        self.output.send_event(peer_id, event).await
    }

    /// Send the same event to every peer in `peers`.
    pub async fn fan_out(&self, peers: &[PeerId], event: &ServerEvent) {
        for peer_id in peers {
            if !self.output.send_event(peer_id, event.clone()).await {
                debug!(peer = %peer_id, "Skipping fan-out to closed connection");
            }
        }
    }
}
