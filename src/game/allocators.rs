//! Round-robin colour and start-position allocation for joining players

use super::objects::Position;

/// Player colours, handed out in this order
pub const PALETTE: [&str; 5] = [
    "#0000FF", // blue
    "#008000", // green
    "#FFFF00", // yellow
    "#800080", // purple
    "#FFA500", // orange
];

/// Cycles through [`PALETTE`]
#[derive(Debug, Default)]
pub struct ColorAllocator {
    index: usize,
}

impl ColorAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> String {
        let color = PALETTE[self.index];
        self.index = (self.index + 1) % PALETTE.len();
        color.to_string()
    }
}

/// Hands out start positions at the top of the slope.
///
/// Every player currently spawns at the horizontal centre; `start_box_width`
/// is carried but not applied, so simultaneous joiners overlap.
// TODO: spread players across `start_box_width` once a spawn layout is agreed.
#[derive(Debug)]
pub struct StartPositionAllocator {
    #[allow(dead_code)]
    start_box_width: f64,
    map_width: u32,
    #[allow(dead_code)]
    map_height: u32,
    index: usize,
}

impl StartPositionAllocator {
    pub fn new(start_box_width: f64, map_width: u32, map_height: u32) -> Self {
        Self {
            start_box_width,
            map_width,
            map_height,
            index: 0,
        }
    }

    pub fn next_start_position(&mut self) -> Position {
        let x = (self.map_width / 2) as f64;
        self.index += 1;
        Position::new(x, 0.0)
    }

    /// Number of positions handed out so far
    pub fn issued(&self) -> usize {
        self.index
    }
}
