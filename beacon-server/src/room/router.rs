use crate::room::registry::ConnectionRegistry;
use crate::room::room_command::{RelayCommand, RoomStats};
use crate::signaling::{PeerChannel, SignalingOutput};
use beacon_core::{Payload, PeerId, RoomId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Event loop that owns room membership.
///
/// Commands are handled one at a time, so every registry mutation together
/// with its notifications is atomic with respect to other peers.
pub struct RoomRouter {
    registry: ConnectionRegistry,
    channel: PeerChannel,
    command_rx: mpsc::Receiver<RelayCommand>,
}

impl RoomRouter {
    pub fn new(command_rx: mpsc::Receiver<RelayCommand>, signaling: Arc<dyn SignalingOutput>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            channel: PeerChannel::new(signaling),
            command_rx,
        }
    }

    pub async fn run(mut self) {
        info!("Room router started");

        while let Some(cmd) = self.command_rx.recv().await {
            if matches!(cmd, RelayCommand::Shutdown) {
                info!("Shutdown requested");
                break;
            }
            self.handle_command(cmd).await;
        }

        info!(
            rooms = self.registry.room_count(),
            peers = self.registry.peer_count(),
            "Room router finished"
        );
    }

    async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Join { peer_id, room_id } => self.join(peer_id, room_id).await,

            RelayCommand::Signal { from, to, data } => {
                if self.registry.room_of(&from).is_none() {
                    debug!(%from, "Ignoring signal from peer outside any room");
                    return;
                }
                self.channel.signal(&from, &to, data).await;
            }

            RelayCommand::Broadcast { from, payload } => self.broadcast(from, payload).await,

            RelayCommand::Disconnect { peer_id } => {
                let Some(departure) = self.registry.disconnect(&peer_id) else {
                    debug!(peer = %peer_id, "Disconnected before joining a room");
                    return;
                };
                info!(peer = %peer_id, room = %departure.room_id, "Peer left");
                self.channel
                    .fan_out(&departure.remaining, &ServerEvent::PeerLeft(peer_id))
                    .await;
            }

            RelayCommand::Stats { reply } => {
                let _ = reply.send(RoomStats {
                    rooms: self.registry.room_count(),
                    peers: self.registry.peer_count(),
                });
            }

            RelayCommand::Shutdown => {}
        }
    }

    async fn join(&mut self, peer_id: PeerId, room_id: RoomId) {
        let outcome = self.registry.join(&peer_id, &room_id);

        if let Some(previous) = outcome.previous {
            info!(peer = %peer_id, from = %previous.room_id, to = %room_id, "Peer switched rooms");
            self.channel
                .fan_out(&previous.remaining, &ServerEvent::PeerLeft(peer_id.clone()))
                .await;
        } else {
            info!(peer = %peer_id, room = %room_id, "Peer joined");
        }

        self.channel
            .deliver(&peer_id, ServerEvent::Peers(outcome.existing.clone()))
            .await;
        self.channel
            .fan_out(&outcome.existing, &ServerEvent::PeerJoined(peer_id))
            .await;
    }

    async fn broadcast(&self, from: PeerId, payload: Payload) {
        if self.registry.room_of(&from).is_none() {
            debug!(%from, "Ignoring broadcast from peer outside any room");
            return;
        }

        let roommates = self.registry.roommates(&from);
        let event = ServerEvent::Broadcast(payload.tagged_with(&from));
        self.channel.fan_out(&roommates, &event).await;
    }
}
