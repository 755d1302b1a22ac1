//! Per-player snapshot payload

use serde::Serialize;

use super::player::{Camera, PlayerId};
use super::room::{Room, RoomError};
use super::viewport::{visible_objects, VisibleObject};

/// What a client receives: the objects in its view and its camera settings
#[derive(Debug, Serialize)]
pub struct PlayerPayload<'a> {
    pub game_objects: Vec<VisibleObject<'a>>,
    pub camera_params: Camera,
}

/// Build the payload for player `id`
pub fn build_payload(room: &Room, id: PlayerId) -> Result<PlayerPayload<'_>, RoomError> {
    let player = room.player(id).ok_or(RoomError::PlayerNotFound(id))?;

    Ok(PlayerPayload {
        game_objects: visible_objects(room, player),
        camera_params: player.current_camera(),
    })
}
