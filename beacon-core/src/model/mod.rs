mod payload;
mod peer;
mod room;
mod signaling;

pub use payload::Payload;
pub use peer::PeerId;
pub use room::RoomId;
pub use signaling::{ClientEvent, ServerEvent};
