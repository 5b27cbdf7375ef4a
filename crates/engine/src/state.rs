//! The state shared between the game loop's activities.

use crate::core::{Clock, Player, World};
use crate::store::{generate_pasture, MapStore, SaveData};
use crate::types::Position;

/// Size of the generated map used when the saved one is unavailable.
pub const DEFAULT_MAP_SIZE: usize = 1000;

/// Everything guarded by the game loop's lock.
#[derive(Debug, Clone)]
pub struct GameState {
    pub world: World,
    pub player: Player,
    pub clock: Clock,
    /// Whether the clock advances.
    pub time_running: bool,
    /// Notification waiting to be shown on the next frame.
    pub notice: Option<String>,
}

impl GameState {
    pub fn new(world: World, player: Player, clock: Clock) -> Self {
        Self {
            world,
            player,
            clock,
            time_running: true,
            notice: None,
        }
    }

    /// Restore a session from a save record.
    ///
    /// A saved position that is not walkable in `world` is moved to the
    /// nearest walkable cell.
    pub fn from_save(world: World, save: &SaveData) -> Self {
        let saved = Position::new(save.player.x, save.player.y);
        let pos = match world.nearest_walkable(saved) {
            Some(p) if p != saved => {
                tracing::warn!(?saved, moved_to = ?p, "saved position not walkable");
                p
            }
            Some(p) => p,
            None => {
                tracing::warn!(world = world.name(), "map has no walkable cell");
                saved
            }
        };
        let clock = Clock::from_state(save.time.into());
        Self::new(world, Player::new(pos.x, pos.y), clock)
    }

    /// The persisted view of this state.
    pub fn to_save(&self, settings: &crate::store::Settings) -> SaveData {
        SaveData {
            world: self.world.name().to_string(),
            player: self.player.position().into(),
            time: self.clock.state().into(),
            settings: settings.clone(),
        }
    }
}

/// Load `name` from `maps`, falling back to a generated pasture.
///
/// A missing map is generated and written back so the next start finds it.
/// A map that exists but cannot be read is left on disk untouched.
pub fn load_or_generate(maps: &MapStore, name: &str) -> World {
    match maps.load(name) {
        Ok(world) => world,
        Err(err) if err.is_not_found() => {
            tracing::warn!(name, "map not found, generating default");
            let world = generate_pasture(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE);
            if let Err(err) = maps.save(&world) {
                tracing::warn!(error = %err, "could not write generated map");
            }
            world
        }
        Err(err) => {
            tracing::warn!(name, error = %err, "map unreadable, using generated default");
            generate_pasture(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE)
        }
    }
}
