use beacon_core::{PeerId, RoomId};
use std::collections::{HashMap, HashSet};

/// A peer leaving a room, and who is still there afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room_id: RoomId,
    pub remaining: Vec<PeerId>,
}

/// Result of [`ConnectionRegistry::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Members of the target room before the join, without the joiner.
    pub existing: Vec<PeerId>,
    /// Set when the join moved the peer out of a different room.
    pub previous: Option<Departure>,
}

/// Room membership: every peer is in at most one room, and rooms exist
/// only while they have members.
///
/// Ordering of returned member lists is unspecified.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    rooms: HashMap<RoomId, HashSet<PeerId>>,
    memberships: HashMap<PeerId, RoomId>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `peer_id` into `room_id`, leaving its current room if different.
    pub fn join(&mut self, peer_id: &PeerId, room_id: &RoomId) -> JoinOutcome {
        let switching = self
            .memberships
            .get(peer_id)
            .is_some_and(|current| current != room_id);
        let previous = if switching {
            self.disconnect(peer_id)
        } else {
            None
        };

        let members = self.rooms.entry(room_id.clone()).or_default();
        let existing = members
            .iter()
            .filter(|member| *member != peer_id)
            .cloned()
            .collect();
        members.insert(peer_id.clone());
        self.memberships.insert(peer_id.clone(), room_id.clone());

        JoinOutcome { existing, previous }
    }

    /// Remove `peer_id` from `room_id`. Returns whether it was a member.
    pub fn leave(&mut self, peer_id: &PeerId, room_id: &RoomId) -> bool {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return false;
        };

        let removed = members.remove(peer_id);
        if members.is_empty() {
            self.rooms.remove(room_id);
        }
        if self.memberships.get(peer_id) == Some(room_id) {
            self.memberships.remove(peer_id);
        }

        removed
    }

    /// Drop the peer from whatever room it is in.
    ///
    /// `None` if the peer never joined a room.
    pub fn disconnect(&mut self, peer_id: &PeerId) -> Option<Departure> {
        let room_id = self.memberships.remove(peer_id)?;
        self.leave(peer_id, &room_id);

        let remaining = self.members(&room_id);
        Some(Departure { room_id, remaining })
    }

    pub fn room_of(&self, peer_id: &PeerId) -> Option<&RoomId> {
        self.memberships.get(peer_id)
    }

    pub fn members(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Everyone in the peer's room except the peer itself.
    pub fn roommates(&self, peer_id: &PeerId) -> Vec<PeerId> {
        let Some(room_id) = self.room_of(peer_id) else {
            return Vec::new();
        };
        self.members(room_id)
            .into_iter()
            .filter(|member| member != peer_id)
            .collect()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn peer_count(&self) -> usize {
        self.memberships.len()
    }
}
