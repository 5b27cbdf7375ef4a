//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::Action`] and runs the key
//! capture on a background thread so the rest of the game never blocks on
//! the keyboard.

pub mod keys;
pub mod map;
pub mod source;

pub use tui_pasture_types as types;

pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub use keys::{CrosstermKeys, KeySource, ScriptedKeys};
pub use map::{classify, describe_key};
pub use source::{InputSource, InputState, KeyAction};
