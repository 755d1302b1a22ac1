//! Room state and spatial queries

pub mod allocators;
pub mod map_gen;
pub mod objects;
pub mod params;
pub mod player;
pub mod room;
pub mod snapshot;
pub mod viewport;

pub use objects::ObjectKind;
pub use params::GameParameters;
pub use player::{ConnectionId, InputOutcome, PlayerId};
pub use room::{Room, RoomError, SharedRoom};
pub use snapshot::build_payload;
