use crate::model::payload::Payload;
use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frames a client sends over the socket.
///
/// Encoded as `{"event": "<name>", "data": <payload>}`. A missing `data`
/// reads as `null`, so `{"event":"broadcast"}` is a valid broadcast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join (or switch to) a room.
    Join(RoomId),

    /// Point-to-point relay request.
    Signal {
        to: PeerId,
        #[serde(default)]
        data: Payload,
    },

    /// Relay to every other member of the sender's room.
    Broadcast(Payload),
}

const CLIENT_EVENTS: &[&str] = &["join", "signal", "broadcast"];

#[derive(Deserialize)]
struct RawClientEvent {
    event: String,
    #[serde(default)]
    data: Value,
}

#[derive(Deserialize)]
struct SignalRequest {
    to: PeerId,
    #[serde(default)]
    data: Payload,
}

impl<'de> Deserialize<'de> for ClientEvent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawClientEvent { event, data } = RawClientEvent::deserialize(deserializer)?;

        match event.as_str() {
            "join" => RoomId::deserialize(data)
                .map(ClientEvent::Join)
                .map_err(de::Error::custom),
            "signal" => {
                let SignalRequest { to, data } =
                    SignalRequest::deserialize(data).map_err(de::Error::custom)?;
                Ok(ClientEvent::Signal { to, data })
            }
            "broadcast" => Ok(ClientEvent::Broadcast(Payload(data))),
            other => Err(de::Error::unknown_variant(other, CLIENT_EVENTS)),
        }
    }
}

impl ClientEvent {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Frames the relay pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Identifier assigned to this connection.
    Welcome(PeerId),

    /// Other members of the room at the moment of joining.
    Peers(Vec<PeerId>),

    PeerJoined(PeerId),

    Signal {
        from: PeerId,
        #[serde(default)]
        data: Payload,
    },

    /// Already tagged with the sender, see [`Payload::tagged_with`].
    Broadcast(Payload),

    PeerLeft(PeerId),
}

impl ServerEvent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
