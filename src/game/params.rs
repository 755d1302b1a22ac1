//! Game parameters for a room

use super::map_gen::FINISH_FLAG_SPACING;
use super::room::RoomError;

/// Most map objects (obstacles, powerups and finish flags) one room may hold
pub const MAX_MAP_OBJECTS: usize = 1_000_000;

/// Immutable configuration snapshot for one room
#[derive(Debug, Clone, PartialEq)]
pub struct GameParameters {
    /// World width in distance units
    pub width: u32,
    /// World height (downhill length) in distance units
    pub height: u32,
    /// Band at the top of the slope kept free of obstacles and powerups
    pub object_start_offset: f64,
    /// Space between the finish line and the bottom of the world
    pub finish_line_offset: f64,
    pub player_start_distance: f64,
    pub n_obstacles: usize,
    pub n_powerups: usize,

    // Physics constants, not yet used by any simulation step
    pub acceleration: f64,
    pub slope: f64,
    pub friction: f64,
    pub air_resistance: f64,
}

impl Default for GameParameters {
    fn default() -> Self {
        Self {
            width: 3000,
            height: 20000,
            object_start_offset: 200.0,
            finish_line_offset: 100.0,
            player_start_distance: 20.0,
            n_obstacles: 5000,
            n_powerups: 500,
            acceleration: 9.8,
            slope: 0.1,
            friction: 0.1,
            air_resistance: 0.1,
        }
    }
}

impl GameParameters {
    /// Y coordinate of the finish line
    pub fn finish_line_y(&self) -> f64 {
        self.height as f64 - self.finish_line_offset
    }

    /// Map objects the generator will place, or `None` on overflow
    pub fn map_object_count(&self) -> Option<usize> {
        let flags = self.width.div_ceil(FINISH_FLAG_SPACING) as usize;
        self.n_obstacles
            .checked_add(self.n_powerups)?
            .checked_add(flags)
    }

    /// Reject parameters the map generator cannot honour
    pub fn validate(&self) -> Result<(), RoomError> {
        let invalid = |msg: String| Err(RoomError::InvalidParameters(msg));

        if self.width == 0 {
            return invalid("width must be positive".to_string());
        }
        for (name, value) in [
            ("object_start_offset", self.object_start_offset),
            ("finish_line_offset", self.finish_line_offset),
            ("player_start_distance", self.player_start_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        if self.height as f64 <= self.object_start_offset + self.finish_line_offset {
            return invalid(format!(
                "height {} must exceed object_start_offset + finish_line_offset ({})",
                self.height,
                self.object_start_offset + self.finish_line_offset
            ));
        }
        match self.map_object_count() {
            Some(total) if total <= MAX_MAP_OBJECTS => {}
            _ => {
                return invalid(format!(
                    "n_obstacles {} + n_powerups {} plus finish flags exceeds {MAX_MAP_OBJECTS} objects",
                    self.n_obstacles, self.n_powerups
                ))
            }
        }
        for (name, value) in [
            ("acceleration", self.acceleration),
            ("slope", self.slope),
            ("friction", self.friction),
            ("air_resistance", self.air_resistance),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameParameters::default().validate().is_ok());
        assert_eq!(GameParameters::default().finish_line_y(), 19900.0);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let params = GameParameters {
            height: 250,
            object_start_offset: 200.0,
            finish_line_offset: 100.0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(RoomError::InvalidParameters(_))));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let params = GameParameters {
            finish_line_offset: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        let params = GameParameters {
            width: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_object_count_overflow_rejected() {
        let params = GameParameters {
            n_obstacles: usize::MAX,
            n_powerups: 1,
            ..Default::default()
        };
        assert_eq!(params.map_object_count(), None);
        assert!(matches!(params.validate(), Err(RoomError::InvalidParameters(_))));
    }

    #[test]
    fn test_object_count_limit() {
        // 3000 wide -> 150 finish flags
        let at_limit = GameParameters {
            n_obstacles: MAX_MAP_OBJECTS - 150,
            n_powerups: 0,
            ..Default::default()
        };
        assert_eq!(at_limit.map_object_count(), Some(MAX_MAP_OBJECTS));
        assert!(at_limit.validate().is_ok());

        let over = GameParameters {
            n_powerups: 1,
            ..at_limit
        };
        assert!(over.validate().is_err());
    }
}
