//! Viewport culling: which objects a player's camera can see

use serde::Serialize;

use super::objects::{GameObject, MapObject, Position};
use super::player::{Camera, Player};
use super::room::Room;

/// Axis-aligned box around a camera, inclusive on every edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ViewBounds {
    /// Half the view plus the buffer on each side of the camera position
    pub fn around(camera: &Camera) -> Self {
        let half_w = (camera.view_width / 2) as f64 + camera.view_buffer as f64;
        let half_h = (camera.view_height / 2) as f64 + camera.view_buffer as f64;
        let Position { x, y, .. } = camera.position;
        Self {
            min_x: x - half_w,
            max_x: x + half_w,
            min_y: y - half_h,
            max_y: y + half_h,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.min_x
            && position.x <= self.max_x
            && position.y >= self.min_y
            && position.y <= self.max_y
    }
}

/// A borrowed object as sent to clients
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VisibleObject<'a> {
    Map(&'a MapObject),
    Player(&'a Player),
}

impl VisibleObject<'_> {
    pub fn position(&self) -> Position {
        match self {
            Self::Map(object) => object.position(),
            Self::Player(player) => player.position,
        }
    }
}

/// Objects inside `player`'s view, in room order.
///
/// The camera is re-centred on the player's current position first. Other
/// players and the querying player are included. This is a linear scan over
/// every object in the room.
pub fn visible_objects<'a>(room: &'a Room, player: &Player) -> Vec<VisibleObject<'a>> {
    let bounds = ViewBounds::around(&player.current_camera());

    room.game_objects()
        .iter()
        .filter_map(|object| match object {
            GameObject::Map(map_object) => Some(VisibleObject::Map(map_object)),
            GameObject::Player(id) => room.player(*id).map(VisibleObject::Player),
        })
        .filter(|object| bounds.contains(object.position()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::objects::ObjectKind;
    use crate::game::params::GameParameters;
    use crate::game::player::{ConnectionId, PlayerId};

    fn camera_at(x: f64, y: f64) -> Camera {
        Camera::new(PlayerId(0), Position::new(x, y), 0.0, 0.0)
    }

    #[test]
    fn test_bounds_with_default_view() {
        let bounds = ViewBounds::around(&camera_at(1000.0, 500.0));
        assert_eq!(
            bounds,
            ViewBounds {
                min_x: 660.0,
                max_x: 1340.0,
                min_y: 210.0,
                max_y: 790.0,
            }
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = ViewBounds::around(&camera_at(1000.0, 500.0));
        assert!(bounds.contains(Position::new(1000.0 + 340.0, 500.0)));
        assert!(!bounds.contains(Position::new(1000.0 + 341.0, 500.0)));
        assert!(bounds.contains(Position::new(1000.0 - 340.0, 500.0)));
        assert!(!bounds.contains(Position::new(1000.0 - 341.0, 500.0)));
        assert!(bounds.contains(Position::new(1000.0, 500.0 + 290.0)));
        assert!(!bounds.contains(Position::new(1000.0, 500.0 + 290.5)));
        assert!(bounds.contains(Position::new(1000.0, 500.0 - 290.0)));
    }

    fn room(width: u32, height: u32) -> Room {
        Room::with_seed(
            GameParameters {
                width,
                height,
                n_obstacles: 0,
                n_powerups: 0,
                finish_line_offset: 100.0,
                ..Default::default()
            },
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_start_area_sees_only_the_player() {
        let mut room = room(100, 1000);
        let id = room.admit(ConnectionId::new()).id;

        let flags = room
            .game_objects()
            .iter()
            .filter(|o| o.kind() == ObjectKind::FinishFlag)
            .count();
        assert_eq!(flags, 5);
        assert_eq!(room.game_objects().len(), 6);

        let player = room.player(id).unwrap();
        let bounds = ViewBounds::around(&player.current_camera());
        // Player spawns at (50, 0); flags sit at y = 900, beyond max_y = 290
        assert_eq!(bounds.max_y, 290.0);

        let visible = visible_objects(&room, player);
        assert_eq!(visible, vec![VisibleObject::Player(player)]);
    }

    #[test]
    fn test_camera_refreshed_from_player_position() {
        let mut room = room(100, 1000);
        let id = room.admit(ConnectionId::new()).id;

        // Move the player near the finish line without touching the camera copy
        let mut moved = room.player(id).unwrap().clone();
        moved.position = Position::new(50.0, 850.0);

        let bounds = ViewBounds::around(&moved.current_camera());
        let expected: Vec<Position> = room
            .game_objects()
            .iter()
            .filter_map(|o| match o {
                GameObject::Map(m) => Some(m.position()),
                GameObject::Player(_) => None,
            })
            .filter(|p| bounds.contains(*p))
            .collect();
        assert_eq!(expected.len(), 5);

        let visible: Vec<Position> = visible_objects(&room, &moved)
            .iter()
            .map(VisibleObject::position)
            .collect();
        // Flags are in view; the room's copy of the player is still at y = 0
        assert_eq!(visible, expected);
    }

    #[test]
    fn test_other_players_are_visible_in_room_order() {
        let mut room = room(100, 1000);
        let a = room.admit(ConnectionId::new()).id;
        let b = room.admit(ConnectionId::new()).id;

        let player_b = room.player(b).unwrap();
        let ids: Vec<PlayerId> = visible_objects(&room, player_b)
            .iter()
            .filter_map(|o| match o {
                VisibleObject::Player(p) => Some(p.id),
                VisibleObject::Map(_) => None,
            })
            .collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_boundary_object_from_room() {
        let mut room = Room::with_seed(
            GameParameters {
                width: 3000,
                height: 1000,
                n_obstacles: 0,
                n_powerups: 0,
                finish_line_offset: 100.0,
                ..Default::default()
            },
            0,
        )
        .unwrap();
        let id = room.admit(ConnectionId::new()).id;

        // Player at (1500, 0) viewing near the finish line at y = 900
        let mut skier = room.player(id).unwrap().clone();
        skier.position = Position::new(1500.0, 900.0);

        let xs: Vec<f64> = visible_objects(&room, &skier)
            .iter()
            .filter_map(|o| match o {
                VisibleObject::Map(m) => Some(m.position().x),
                VisibleObject::Player(_) => None,
            })
            .collect();

        // Flags every 20 units; 1160 and 1840 are exactly on the edges
        let expected: Vec<f64> = (58..=92).map(|i| (i * 20) as f64).collect();
        assert_eq!(xs, expected);
    }
}
