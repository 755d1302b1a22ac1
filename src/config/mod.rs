//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::game::GameParameters;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines (LOG_FORMAT=json)
    pub log_json: bool,
    /// File that also receives warnings and errors (LOG_FILE, empty to disable)
    pub log_file: Option<PathBuf>,
    /// A session with no inbound frame for this long is closed
    pub idle_timeout: Duration,
    /// Max inbound messages per second per connection
    pub input_rate_limit: u32,
    /// Seed for map generation (random when unset)
    pub map_seed: Option<u64>,
    /// Parameters for the room
    pub game: GameParameters,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Hosting platforms provide PORT, fall back to SERVER_ADDR or default
        let server_addr = if let Some(port) = lookup("PORT") {
            format!("0.0.0.0:{}", port)
        } else {
            lookup("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:8765".to_string())
        };

        let defaults = GameParameters::default();
        let game = GameParameters {
            width: parse_or(&lookup, "GAME_WIDTH", defaults.width)?,
            height: parse_or(&lookup, "GAME_HEIGHT", defaults.height)?,
            object_start_offset: parse_or(
                &lookup,
                "GAME_OBJECT_START_OFFSET",
                defaults.object_start_offset,
            )?,
            finish_line_offset: parse_or(
                &lookup,
                "GAME_FINISH_LINE_OFFSET",
                defaults.finish_line_offset,
            )?,
            player_start_distance: parse_or(
                &lookup,
                "GAME_PLAYER_START_DISTANCE",
                defaults.player_start_distance,
            )?,
            n_obstacles: parse_or(&lookup, "GAME_N_OBSTACLES", defaults.n_obstacles)?,
            n_powerups: parse_or(&lookup, "GAME_N_POWERUPS", defaults.n_powerups)?,
            acceleration: parse_or(&lookup, "GAME_ACCELERATION", defaults.acceleration)?,
            slope: parse_or(&lookup, "GAME_SLOPE", defaults.slope)?,
            friction: parse_or(&lookup, "GAME_FRICTION", defaults.friction)?,
            air_resistance: parse_or(&lookup, "GAME_AIR_RESISTANCE", defaults.air_resistance)?,
        };

        Ok(Self {
            server_addr: server_addr
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: lookup("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
            log_file: match lookup("LOG_FILE") {
                Some(path) if path.trim().is_empty() => None,
                Some(path) => Some(PathBuf::from(path.trim())),
                None => Some(PathBuf::from("server.log")),
            },

            idle_timeout: Duration::from_secs(parse_or(&lookup, "IDLE_TIMEOUT_SECS", 300)?),
            input_rate_limit: parse_or(&lookup, "INPUT_RATE_LIMIT", 30)?,

            map_seed: lookup("MAP_SEED")
                .map(|raw| raw.trim().parse().map_err(|_| ConfigError::Invalid("MAP_SEED")))
                .transpose()?,

            game,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Invalid server address format")]
    InvalidAddress,
}
