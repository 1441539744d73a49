use beacon_core::{Payload, PeerId, RoomId};
use serde::Serialize;
use tokio::sync::oneshot;

/// Commands handed from socket tasks to the [`RoomRouter`](crate::RoomRouter).
#[derive(Debug)]
pub enum RelayCommand {
    /// The peer asked to join (or switch to) a room.
    Join { peer_id: PeerId, room_id: RoomId },

    /// Point-to-point relay request.
    Signal {
        from: PeerId,
        to: PeerId,
        data: Payload,
    },

    /// Relay to the rest of the sender's room.
    Broadcast { from: PeerId, payload: Payload },

    /// The socket is gone.
    Disconnect { peer_id: PeerId },

    /// Snapshot of registry sizes.
    Stats { reply: oneshot::Sender<RoomStats> },

    /// Stop the router loop.
    Shutdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoomStats {
    pub rooms: usize,
    pub peers: usize,
}
