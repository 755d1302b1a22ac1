//! Application state shared across routes

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::game::{Room, RoomError, SharedRoom};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub room: SharedRoom,
    started_at: Instant,
}

impl AppState {
    /// Build the state, creating the room from the configured parameters
    pub fn new(config: Config) -> Result<Self, RoomError> {
        let room = match config.map_seed {
            Some(seed) => Room::with_seed(config.game.clone(), seed)?,
            None => Room::new(config.game.clone())?,
        };

        Ok(Self {
            config: Arc::new(config),
            room: room.into_shared(),
            started_at: Instant::now(),
        })
    }

    /// Time since the room was opened
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameParameters;

    fn config(game: GameParameters) -> Config {
        Config {
            game,
            ..Config::from_lookup(|_| None).unwrap()
        }
    }

    #[test]
    fn test_fresh_state_has_empty_room() {
        let state = AppState::new(config(GameParameters::default())).unwrap();
        assert!(state.uptime() < Duration::from_secs(5));
        assert_eq!(state.room.read().player_count(), 0);
        assert!(!state.room.read().map_generated());
    }

    #[test]
    fn test_invalid_parameters_stop_startup() {
        let game = GameParameters {
            n_obstacles: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            AppState::new(config(game)),
            Err(RoomError::InvalidParameters(_))
        ));
    }
}
