//! Game engine: configuration, shared state, and the threaded game loop.
//!
//! See [`game_loop`] for the concurrency model.

pub mod config;
pub mod game_loop;
pub mod state;

pub use tui_pasture_core as core;
pub use tui_pasture_input as input;
pub use tui_pasture_store as store;
pub use tui_pasture_term as term;
pub use tui_pasture_types as types;

pub use config::{Config, Timing};
pub use game_loop::{GameLoop, SaveSink};
pub use state::{load_or_generate, GameState, DEFAULT_MAP_SIZE};
