//! Core world logic module - pure, deterministic, and testable
//!
//! This module contains the world model, movement rules, and the in-game
//! clock. It has **zero dependencies** on terminals, threads, or I/O, making it:
//!
//! - **Deterministic**: the same inputs always produce the same state
//! - **Testable**: every rule is exercised without a terminal
//! - **Portable**: shared by the renderer, the game loop, and the stores
//!
//! # Module Structure
//!
//! - [`grid`]: flat tile storage with a fixed non-walkable border
//! - [`world`]: named grid with walkability queries and viewport extraction
//! - [`player`]: position plus the walkability-checked move
//! - [`clock`]: minute counter with day/season/year rollover
//! - [`locale`]: the localization seam used for calendar text
//!
//! # Example
//!
//! ```
//! use tui_pasture_core::{Player, TileGrid, World};
//! use tui_pasture_types::Tile;
//!
//! let world = World::new("demo", TileGrid::new(5, 5, Tile::default()));
//! let mut player = Player::new(2, 2);
//!
//! assert!(player.try_move(1, 0, &world));
//! assert!(!player.try_move(1, 0, &world)); // border
//! assert_eq!((player.x, player.y), (3, 2));
//! ```

pub mod clock;
pub mod grid;
pub mod locale;
pub mod player;
pub mod world;

pub use tui_pasture_types as types;

pub use clock::{Clock, ClockState, TickOutcome};
pub use grid::TileGrid;
pub use locale::{Localize, NoLocale};
pub use player::Player;
pub use world::{ViewportFrame, World};
