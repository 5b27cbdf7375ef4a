//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (world logic, terminal rendering, persistence).
//!
//! # Grid Cells
//!
//! Every grid cell is a fixed-width [`Tile`] record:
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | `ch` | `char` | Display character |
//! | `walkable` | `bool` | Whether the player may stand on the cell |
//! | `terrain` | [`TerrainKind`] | 0 = unset, 1 = path, 2 = field, ... |
//! | `color` | `Option<Rgb>` | `None` means "inherit the terminal default" |
//!
//! # Calendar Constants
//!
//! The in-game clock counts minutes from 0 to 1439. The displayed day starts at
//! 6:00, so the display adds [`DAY_START_OFFSET`] minutes and the "new day"
//! rollover happens when the raw counter reaches [`NEW_DAY_THRESHOLD`]
//! (local midnight).
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MINUTES_PER_DAY` | 1440 | Raw counter wraps here |
//! | `DAY_START_OFFSET` | 360 | Display offset (day starts at 6:00) |
//! | `NEW_DAY_THRESHOLD` | 1080 | Raw minute of local midnight |
//! | `DAYS_PER_MONTH` | 30 | Day rolls over after 30 |
//! | `MONTHS_PER_YEAR` | 4 | One month per season |
//! | `DAYS_PER_WEEK` | 7 | Weekday cycle |
//!
//! # Examples
//!
//! ```
//! use tui_pasture_types::{Action, Rgb, Tile, TerrainKind};
//!
//! let grass = Tile::new('.', true, TerrainKind::FIELD, Some(Rgb::new(0, 160, 0)));
//! assert!(grass.walkable);
//!
//! let action = Action::Move { dx: 1, dy: 0 };
//! assert_eq!(action.as_str(), "move");
//! ```

/// Raw minutes in one in-game day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Display offset: the in-game day visually starts at 6:00.
pub const DAY_START_OFFSET: u32 = 360;

/// Raw minute value at which the displayed clock passes midnight.
pub const NEW_DAY_THRESHOLD: u32 = MINUTES_PER_DAY - DAY_START_OFFSET;

/// Days in a month (one month per season).
pub const DAYS_PER_MONTH: u32 = 30;

/// Months (seasons) in a year.
pub const MONTHS_PER_YEAR: u32 = 4;

/// Weekday cycle length.
pub const DAYS_PER_WEEK: u32 = 7;

/// Default frames per second for the render loop.
pub const DEFAULT_FPS: u32 = 30;

/// Real milliseconds per in-game minute.
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Bounded timeout for a single key read.
pub const KEY_POLL_MS: u64 = 50;

/// Terminal rows reserved around the map viewport (header, gaps, footer).
pub const RESERVED_ROWS: u16 = 5;

/// Character used to mark the player on the viewport.
pub const PLAYER_GLYPH: char = '@';

/// Player marker color.
pub const PLAYER_COLOR: Rgb = Rgb::new(255, 0, 0);

/// Character stamped on every grid border cell.
pub const BORDER_GLYPH: char = '#';

/// Color stamped on every grid border cell.
pub const BORDER_COLOR: Rgb = Rgb::new(128, 128, 128);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Terrain tag stored per tile.
///
/// The set is open-ended: the named constants cover the tags the built-in
/// maps use, any other value is carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TerrainKind(pub u8);

impl TerrainKind {
    pub const UNSET: TerrainKind = TerrainKind(0);
    pub const PATH: TerrainKind = TerrainKind(1);
    pub const FIELD: TerrainKind = TerrainKind(2);
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub ch: char,
    pub walkable: bool,
    pub terrain: TerrainKind,
    pub color: Option<Rgb>,
}

impl Tile {
    pub const fn new(ch: char, walkable: bool, terrain: TerrainKind, color: Option<Rgb>) -> Self {
        Self {
            ch,
            walkable,
            terrain,
            color,
        }
    }

    /// The fixed tile stamped on every grid border cell.
    pub const fn border() -> Self {
        Self::new(BORDER_GLYPH, false, TerrainKind::UNSET, Some(BORDER_COLOR))
    }

    /// The visible part of the tile.
    pub const fn glyph(&self) -> Glyph {
        Glyph {
            ch: self.ch,
            color: self.color,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new('.', true, TerrainKind::UNSET, None)
    }
}

/// What a single screen cell shows: a character and an optional color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub color: Option<Rgb>,
}

impl Glyph {
    pub const fn new(ch: char, color: Option<Rgb>) -> Self {
        Self { ch, color }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self { ch: ' ', color: None }
    }
}

/// Grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// The closed set of effects a key press can cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Step the player by a delta.
    Move { dx: i32, dy: i32 },
    /// Persist the current session.
    Save,
    /// Leave the game loop.
    Quit,
    /// Toggle the in-game clock.
    Pause,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move { .. } => "move",
            Action::Save => "save",
            Action::Quit => "quit",
            Action::Pause => "pause",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_threshold_matches_day_offset() {
        assert_eq!(NEW_DAY_THRESHOLD, 1080);
        assert_eq!(NEW_DAY_THRESHOLD + DAY_START_OFFSET, MINUTES_PER_DAY);
    }

    #[test]
    fn border_tile_is_never_walkable() {
        let t = Tile::border();
        assert!(!t.walkable);
        assert_eq!(t.ch, BORDER_GLYPH);
        assert_eq!(t.color, Some(BORDER_COLOR));
    }
}
