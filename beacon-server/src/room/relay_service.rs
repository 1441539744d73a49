use crate::error::RelayError;
use crate::room::room_command::{RelayCommand, RoomStats};
use crate::room::router::RoomRouter;
use crate::signaling::SignalingService;
use beacon_core::{ClientEvent, PeerId};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Live relay counters, as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    /// Open WebSocket connections.
    pub connections: usize,
    /// Connections that have joined a room.
    pub peers: usize,
    pub rooms: usize,
}

/// One running relay: the connection table plus the router task that owns
/// room membership. Cheap to clone; all clones share the same relay.
#[derive(Clone)]
pub struct RelayService {
    signaling: SignalingService,
    command_tx: mpsc::Sender<RelayCommand>,
    router_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl RelayService {
    /// Spawn the router task. Must be called inside a Tokio runtime.
    pub fn start(command_buffer: usize) -> Self {
        let signaling = SignalingService::new();
        let (command_tx, command_rx) = mpsc::channel(command_buffer.max(1));

        let router = RoomRouter::new(command_rx, Arc::new(signaling.clone()));
        let router_task = tokio::spawn(router.run());

        Self {
            signaling,
            command_tx,
            router_task: Arc::new(Mutex::new(Some(router_task))),
        }
    }

    pub fn signaling(&self) -> &SignalingService {
        &self.signaling
    }

    pub async fn send(&self, cmd: RelayCommand) -> Result<(), RelayError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| RelayError::RelayClosed)
    }

    /// Turn a frame received from `peer_id` into a router command.
    pub async fn dispatch(&self, peer_id: PeerId, event: ClientEvent) -> Result<(), RelayError> {
        let cmd = match event {
            ClientEvent::Join(room_id) => RelayCommand::Join { peer_id, room_id },
            ClientEvent::Signal { to, data } => RelayCommand::Signal {
                from: peer_id,
                to,
                data,
            },
            ClientEvent::Broadcast(payload) => RelayCommand::Broadcast {
                from: peer_id,
                payload,
            },
        };
        self.send(cmd).await
    }

    pub async fn disconnect(&self, peer_id: PeerId) -> Result<(), RelayError> {
        self.send(RelayCommand::Disconnect { peer_id }).await
    }

    pub async fn stats(&self) -> Result<RelayStats, RelayError> {
        let (reply, rx) = oneshot::channel();
        self.send(RelayCommand::Stats { reply }).await?;
        let RoomStats { rooms, peers } = rx.await.map_err(|_| RelayError::RelayClosed)?;

        Ok(RelayStats {
            connections: self.signaling.connected_count(),
            peers,
            rooms,
        })
    }

    /// Stop the router and wait for it to finish. Rooms are discarded.
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(RelayCommand::Shutdown).await;

        let Some(task) = self.router_task.lock().await.take() else {
            return;
        };
        if let Err(e) = task.await {
            warn!("Room router task failed: {}", e);
        }
        info!("Relay stopped");
    }
}
