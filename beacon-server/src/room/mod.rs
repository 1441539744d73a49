mod registry;
mod relay_service;
mod room_command;
mod router;

pub use registry::*;
pub use relay_service::*;
pub use room_command::*;
pub use router::*;
