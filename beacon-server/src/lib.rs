//! WebRTC signaling relay.
//!
//! Peers connect over a WebSocket, join a named room, learn who is already
//! there and then exchange opaque signaling payloads addressed by peer id.
//! Room membership lives in a [`ConnectionRegistry`] owned by a single
//! [`RoomRouter`] task; the live sockets live in a [`SignalingService`].

mod app;
mod config;
mod error;
mod room;
mod signaling;

pub use app::*;
pub use config::*;
pub use error::*;
pub use room::*;
pub use signaling::*;
