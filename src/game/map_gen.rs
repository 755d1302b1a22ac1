//! Procedural map generation

use rand::Rng;

use super::objects::{MapObject, Position};
use super::params::GameParameters;

/// Horizontal spacing between finish-line flags
pub const FINISH_FLAG_SPACING: u32 = 20;

/// Generate the static map: obstacles, then powerups, then the finish line.
///
/// Obstacles and powerups are scattered uniformly over
/// `[0, width) x [object_start_offset, height - finish_line_offset)`.
/// Parameters must already be validated.
pub fn generate<R: Rng + ?Sized>(params: &GameParameters, rng: &mut R) -> Vec<MapObject> {
    let mut objects = Vec::with_capacity(params.map_object_count().unwrap_or_default());

    for _ in 0..params.n_obstacles {
        let is_tree = rng.gen_bool(0.5);
        let position = scatter(params, rng);
        objects.push(if is_tree {
            MapObject::tree(position)
        } else {
            MapObject::rock(position)
        });
    }

    for _ in 0..params.n_powerups {
        objects.push(MapObject::jump(scatter(params, rng)));
    }

    let finish_y = params.finish_line_y();
    for x in (0..params.width).step_by(FINISH_FLAG_SPACING as usize) {
        objects.push(MapObject::finish_flag(Position::new(x as f64, finish_y)));
    }

    objects
}

fn scatter<R: Rng + ?Sized>(params: &GameParameters, rng: &mut R) -> Position {
    let x = rng.gen_range(0.0..params.width as f64);
    let y = rng.gen_range(params.object_start_offset..params.finish_line_y());
    Position::new(x, y)
}
