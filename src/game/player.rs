//! Player objects, their cameras and steering input

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::objects::Position;

/// Default camera viewport, matching the client canvas
pub const DEFAULT_VIEW_WIDTH: u32 = 640;
pub const DEFAULT_VIEW_HEIGHT: u32 = 540;
pub const DEFAULT_VIEW_BUFFER: u32 = 20;

/// Angle change applied by one steering action (degrees)
pub const STEER_STEP: f64 = 15.0;
/// Clamp constant used by steering (degrees)
pub const STEER_LIMIT: f64 = 45.0;

/// Room-scoped player id, assigned sequentially and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque handle to the transport session that owns a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A player's view onto the world.
///
/// Only the view dimensions are serialized. `player` links back to the owner
/// by id, and `position` is a copy that must be refreshed before use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    #[serde(skip)]
    pub position: Position,
    #[serde(skip)]
    pub angle: f64,
    #[serde(skip)]
    pub speed: f64,
    pub view_width: u32,
    pub view_height: u32,
    pub view_buffer: u32,
    #[serde(skip)]
    pub player: PlayerId,
}

impl Camera {
    pub fn new(player: PlayerId, position: Position, angle: f64, speed: f64) -> Self {
        Self {
            position,
            angle,
            speed,
            view_width: DEFAULT_VIEW_WIDTH,
            view_height: DEFAULT_VIEW_HEIGHT,
            view_buffer: DEFAULT_VIEW_BUFFER,
            player,
        }
    }

    /// Copy of this camera moved to `position`
    pub fn at(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

/// Steering commands a client may send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
}

impl Steer {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Result of feeding an action string to a player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Applied,
    IgnoredUnrecognized,
}

/// A skier in the room.
///
/// Serializes as a map object: `{"type": "player", position, height, color, speed, angle}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "player")]
pub struct Player {
    #[serde(skip)]
    pub id: PlayerId,
    pub position: Position,
    pub height: f64,
    pub color: String,
    pub speed: f64,
    pub angle: f64,
    #[serde(skip)]
    pub connection: ConnectionId,
    #[serde(skip)]
    pub camera: Camera,
}

impl Player {
    pub fn new(id: PlayerId, connection: ConnectionId, color: String, position: Position) -> Self {
        let speed = 0.0;
        let angle = 0.0;
        Self {
            id,
            position,
            height: 0.0,
            color,
            speed,
            angle,
            connection,
            camera: Camera::new(id, position, angle, speed),
        }
    }

    /// Camera re-derived from the player's current position
    pub fn current_camera(&self) -> Camera {
        self.camera.at(self.position)
    }

    /// Apply a steering action.
    ///
    /// After `left` the angle is at least 45, after `right` at most -45.
    // TODO: confirm the intended turn limits with game design; the clamp direction looks inverted.
    pub fn handle_input(&mut self, action: &str) -> InputOutcome {
        match Steer::parse(action) {
            Some(Steer::Left) => {
                self.angle = (self.angle + STEER_STEP).max(STEER_LIMIT);
                InputOutcome::Applied
            }
            Some(Steer::Right) => {
                self.angle = (self.angle - STEER_STEP).min(-STEER_LIMIT);
                InputOutcome::Applied
            }
            None => InputOutcome::IgnoredUnrecognized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(
            PlayerId(0),
            ConnectionId::new(),
            "#0000FF".to_string(),
            Position::new(1500.0, 0.0),
        )
    }

    #[test]
    fn test_new_player_starts_still() {
        let p = player();
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.angle, 0.0);
        assert_eq!(p.camera.position, p.position);
        assert_eq!(p.camera.player, p.id);
        assert_eq!(p.camera.view_width, 640);
        assert_eq!(p.camera.view_height, 540);
        assert_eq!(p.camera.view_buffer, 20);
    }

    #[test]
    fn test_left_clamps_up_to_45() {
        let mut p = player();
        assert_eq!(p.handle_input("left"), InputOutcome::Applied);
        assert_eq!(p.angle, 45.0);
        p.handle_input("left");
        assert_eq!(p.angle, 60.0);
    }

    #[test]
    fn test_right_clamps_down_to_minus_45() {
        let mut p = player();
        assert_eq!(p.handle_input("right"), InputOutcome::Applied);
        assert_eq!(p.angle, -45.0);
        p.handle_input("right");
        assert_eq!(p.angle, -60.0);
    }

    #[test]
    fn test_unknown_action_is_ignored() {
        let mut p = player();
        assert_eq!(p.handle_input("jump"), InputOutcome::IgnoredUnrecognized);
        assert_eq!(p.handle_input("LEFT"), InputOutcome::IgnoredUnrecognized);
        assert_eq!(p.angle, 0.0);
    }

    #[test]
    fn test_camera_follows_on_request() {
        let mut p = player();
        p.position = Position::new(10.0, 700.0);
        assert_eq!(p.camera.position, Position::new(1500.0, 0.0));
        assert_eq!(p.current_camera().position, Position::new(10.0, 700.0));
    }

    #[test]
    fn test_player_serialization_hides_internals() {
        let json = serde_json::to_value(player()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "player",
                "position": {"x": 1500.0, "y": 0.0, "z": 0.0},
                "height": 0.0,
                "color": "#0000FF",
                "speed": 0.0,
                "angle": 0.0,
            })
        );
    }

    #[test]
    fn test_camera_serializes_view_only() {
        let json = serde_json::to_value(&player().camera).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"view_width": 640, "view_height": 540, "view_buffer": 20})
        );
    }
}
