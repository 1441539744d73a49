//! Wire model shared by the beacon relay and its clients.

pub mod model;

pub use model::{ClientEvent, Payload, PeerId, RoomId, ServerEvent};
