//! Terminal "world renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids widget/layout libraries and instead keeps a
//! previous-frame buffer of the map area so each frame only repaints the
//! cells that changed.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Bound per-frame output by the number of changed cells, not the view area
//! - Write through any `io::Write` so frames can be inspected in tests

pub mod fb;
pub mod renderer;
pub mod world_view;

pub use tui_pasture_core as core;
pub use tui_pasture_types as types;

pub use fb::FrameBuffer;
pub use renderer::{encode_diff_into, FrameStats, Origin, TerminalRenderer};
pub use world_view::{Scene, TermSize, WorldRenderer};
