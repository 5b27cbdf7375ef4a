//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PASTURE_SAVE_PATH` | `save.json` | Save file |
//! | `PASTURE_MAP_DIR` | `map` | Directory of `<name>.json` maps |
//! | `PASTURE_LANG_DIR` | `translation` | Extra translation files |
//! | `PASTURE_VIEW_W` | `0` | Map columns, 0 fits the terminal |
//! | `PASTURE_VIEW_H` | `0` | Map rows, 0 fits the terminal |
//! | `PASTURE_TICK_MS` | `1000` | Real milliseconds per in-game minute |
//! | `PASTURE_AUTOSAVE_SECS` | `0` | Autosave period, 0 disables |
//! | `PASTURE_LOG_DIR` | `logs` | Log file directory |
//! | `PASTURE_NO_COLOR` | unset | `1`/`true` renders without color |
//!
//! Values that fail to parse fall back to the default.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::store::Settings;
use crate::types::{DEFAULT_FPS, DEFAULT_TICK_MS, KEY_POLL_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub save_path: PathBuf,
    pub map_dir: PathBuf,
    pub lang_dir: PathBuf,
    pub view_w: u16,
    pub view_h: u16,
    pub tick_ms: u64,
    pub autosave_secs: u64,
    pub log_dir: PathBuf,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from("save.json"),
            map_dir: PathBuf::from("map"),
            lang_dir: PathBuf::from("translation"),
            view_w: 0,
            view_h: 0,
            tick_ms: DEFAULT_TICK_MS,
            autosave_secs: 0,
            log_dir: PathBuf::from("logs"),
            color: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let path = |key: &str, default: PathBuf| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        Self {
            save_path: path("PASTURE_SAVE_PATH", d.save_path),
            map_dir: path("PASTURE_MAP_DIR", d.map_dir),
            lang_dir: path("PASTURE_LANG_DIR", d.lang_dir),
            view_w: parse(&lookup, "PASTURE_VIEW_W", d.view_w),
            view_h: parse(&lookup, "PASTURE_VIEW_H", d.view_h),
            tick_ms: parse(&lookup, "PASTURE_TICK_MS", d.tick_ms).max(1),
            autosave_secs: parse(&lookup, "PASTURE_AUTOSAVE_SECS", d.autosave_secs),
            log_dir: path("PASTURE_LOG_DIR", d.log_dir),
            color: !lookup("PASTURE_NO_COLOR")
                .map(|s| matches!(s.trim(), "1" | "true" | "TRUE"))
                .unwrap_or(false),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Intervals the game loop runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub fps: u32,
    /// Wall-clock time per in-game minute.
    pub tick_interval: Duration,
    pub autosave: Option<Duration>,
    /// Bounded wait used by every background poll.
    pub poll: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            autosave: None,
            poll: Duration::from_millis(KEY_POLL_MS),
        }
    }
}

impl Timing {
    pub fn new(config: &Config, settings: &Settings) -> Self {
        Self {
            fps: settings.fps.clamp(1, 240),
            tick_interval: Duration::from_millis(config.tick_ms),
            autosave: (config.autosave_secs > 0).then(|| Duration::from_secs(config.autosave_secs)),
            ..Self::default()
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}
