//! Room state: map objects, player roster and player lifecycle

use std::sync::Arc;

use parking_lot::RwLock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::allocators::{ColorAllocator, StartPositionAllocator};
use super::map_gen;
use super::objects::GameObject;
use super::params::GameParameters;
use super::player::{ConnectionId, InputOutcome, Player, PlayerId};

/// Room shared between sessions. Mutations take the write lock, queries the read lock.
pub type SharedRoom = Arc<RwLock<Room>>;

/// Room errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoomError {
    #[error("Invalid game parameters: {0}")]
    InvalidParameters(String),

    #[error("Player {0} is not in the room")]
    PlayerNotFound(PlayerId),
}

/// Authoritative state for one game session
pub struct Room {
    params: GameParameters,
    players: Vec<Player>,
    /// Map objects plus one entry per player in `players`
    game_objects: Vec<GameObject>,
    /// Total players ever admitted; the next player's id
    player_count: u64,
    map_generated: bool,
    colors: ColorAllocator,
    starts: StartPositionAllocator,
    rng: ChaCha8Rng,
}

impl Room {
    /// Create a room whose map will be seeded from OS entropy
    pub fn new(params: GameParameters) -> Result<Self, RoomError> {
        Self::with_rng(params, ChaCha8Rng::from_entropy())
    }

    /// Create a room whose map is reproducible from `seed`
    pub fn with_seed(params: GameParameters, seed: u64) -> Result<Self, RoomError> {
        Self::with_rng(params, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(params: GameParameters, rng: ChaCha8Rng) -> Result<Self, RoomError> {
        params.validate()?;

        let starts =
            StartPositionAllocator::new(params.player_start_distance, params.width, params.height);

        info!(
            width = params.width,
            height = params.height,
            n_obstacles = params.n_obstacles,
            n_powerups = params.n_powerups,
            "Game room created"
        );

        Ok(Self {
            params,
            players: Vec::new(),
            game_objects: Vec::new(),
            player_count: 0,
            map_generated: false,
            colors: ColorAllocator::new(),
            starts,
            rng,
        })
    }

    pub fn into_shared(self) -> SharedRoom {
        Arc::new(RwLock::new(self))
    }

    /// Admit a new player for `connection`.
    ///
    /// The first admission generates the map.
    pub fn admit(&mut self, connection: ConnectionId) -> &Player {
        let id = PlayerId(self.player_count);
        let color = self.colors.next_color();
        let position = self.starts.next_start_position();
        let player = Player::new(id, connection, color, position);

        if !self.map_generated {
            self.generate_map();
        }

        self.player_count += 1;
        self.players.push(player);
        self.game_objects.push(GameObject::Player(id));

        debug!(
            player_id = %id,
            connection = %connection,
            starts_issued = self.starts.issued(),
            "Player admitted"
        );

        &self.players[self.players.len() - 1]
    }

    /// Remove a player from the roster and the object collection.
    ///
    /// Removing a player that is not in the room is an error.
    pub fn remove(&mut self, id: PlayerId) -> Result<Player, RoomError> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(RoomError::PlayerNotFound(id))?;
        let player = self.players.remove(index);
        self.game_objects
            .retain(|object| !matches!(object, GameObject::Player(pid) if *pid == id));

        debug!(player_id = %id, remaining = self.players.len(), "Player removed");
        Ok(player)
    }

    /// Feed a steering action to a player
    pub fn handle_input(&mut self, id: PlayerId, action: &str) -> Result<InputOutcome, RoomError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RoomError::PlayerNotFound(id))?;
        Ok(player.handle_input(action))
    }

    fn generate_map(&mut self) {
        info!("Generating map");
        let map = map_gen::generate(&self.params, &mut self.rng);
        self.game_objects = map.into_iter().map(GameObject::Map).collect();
        self.map_generated = true;
        info!(objects = self.game_objects.len(), "Map generated");
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Players in admission order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn game_objects(&self) -> &[GameObject] {
        &self.game_objects
    }

    /// Players admitted over the room's lifetime
    pub fn player_count(&self) -> u64 {
        self.player_count
    }

    pub fn map_generated(&self) -> bool {
        self.map_generated
    }
}
