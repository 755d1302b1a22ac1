//! World-space value types and the static map objects

use serde::Serialize;

use super::player::PlayerId;

/// Default collision radius for trees and rocks
pub const OBSTACLE_RADIUS: f64 = 1.0;

/// A point in world space. `z` is reserved for elevation and stays 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Static objects placed by the map generator.
///
/// Serializes internally tagged, e.g. `{"type": "tree", "position": {..}, "height": 0.0, "radius": 1.0}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapObject {
    Tree {
        position: Position,
        height: f64,
        radius: f64,
    },
    Rock {
        position: Position,
        height: f64,
        radius: f64,
    },
    Jump {
        position: Position,
        height: f64,
    },
    FinishFlag {
        position: Position,
        height: f64,
    },
    #[allow(dead_code)]
    StartFlag {
        position: Position,
        height: f64,
    },
}

impl MapObject {
    pub fn tree(position: Position) -> Self {
        Self::Tree {
            position,
            height: 0.0,
            radius: OBSTACLE_RADIUS,
        }
    }

    pub fn rock(position: Position) -> Self {
        Self::Rock {
            position,
            height: 0.0,
            radius: OBSTACLE_RADIUS,
        }
    }

    pub fn jump(position: Position) -> Self {
        Self::Jump {
            position,
            height: 0.0,
        }
    }

    pub fn finish_flag(position: Position) -> Self {
        Self::FinishFlag {
            position,
            height: 0.0,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::Tree { position, .. }
            | Self::Rock { position, .. }
            | Self::Jump { position, .. }
            | Self::FinishFlag { position, .. }
            | Self::StartFlag { position, .. } => *position,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Tree { .. } => ObjectKind::Tree,
            Self::Rock { .. } => ObjectKind::Rock,
            Self::Jump { .. } => ObjectKind::Jump,
            Self::FinishFlag { .. } => ObjectKind::FinishFlag,
            Self::StartFlag { .. } => ObjectKind::StartFlag,
        }
    }
}

/// Closed set of object discriminants, matching the serialized `type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Tree,
    Rock,
    Jump,
    FinishFlag,
    StartFlag,
    Player,
}

/// Entry in a room's object collection.
///
/// Players live in the room's roster; the collection only holds their id so
/// each player has exactly one owner.
#[derive(Debug, Clone, PartialEq)]
pub enum GameObject {
    Map(MapObject),
    Player(PlayerId),
}

impl GameObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Map(object) => object.kind(),
            Self::Player(_) => ObjectKind::Player,
        }
    }
}
