//! Save file: load-or-default and atomic writes.
//!
//! The record is pretty-printed JSON:
//!
//! ```json
//! {
//!   "world": "pasture",
//!   "player": { "x": 10, "y": 10 },
//!   "time": { "minutes_of_day": 1, "day": 1, "month": 0, "year": 1, "weekday": 0 },
//!   "settings": { "language": "zh-CN", "fps": 30 }
//! }
//! ```
//!
//! Every field has a default, so older or partial records still load. A file
//! that is missing or cannot be parsed is replaced by the default record.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::ClockState;
use crate::error::StoreError;
use crate::types::{Position, DEFAULT_FPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    pub x: i32,
    pub y: i32,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self { x: 10, y: 10 }
    }
}

impl From<Position> for PlayerRecord {
    fn from(p: Position) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeRecord {
    #[serde(alias = "time")]
    pub minutes_of_day: u32,
    pub day: u32,
    #[serde(alias = "season")]
    pub month: u32,
    pub year: u32,
    pub weekday: u32,
}

impl Default for TimeRecord {
    fn default() -> Self {
        Self {
            minutes_of_day: 1,
            day: 1,
            month: 0,
            year: 1,
            weekday: 0,
        }
    }
}

impl From<ClockState> for TimeRecord {
    fn from(s: ClockState) -> Self {
        Self {
            minutes_of_day: s.minutes_of_day,
            day: s.day,
            month: s.month,
            year: s.year,
            weekday: s.weekday,
        }
    }
}

impl From<TimeRecord> for ClockState {
    fn from(t: TimeRecord) -> Self {
        Self {
            minutes_of_day: t.minutes_of_day,
            day: t.day,
            month: t.month,
            year: t.year,
            weekday: t.weekday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: String,
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: "zh-CN".to_string(),
            fps: DEFAULT_FPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub world: String,
    pub player: PlayerRecord,
    pub time: TimeRecord,
    pub settings: Settings,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            world: "pasture".to_string(),
            player: PlayerRecord::default(),
            time: TimeRecord::default(),
            settings: Settings::default(),
        }
    }
}

/// A save file at a fixed path.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, substituting and persisting the default when the
    /// file is missing or unparseable.
    ///
    /// Only a failure to write that default back is an error.
    pub fn load_or_default(&self) -> Result<SaveData, StoreError> {
        match self.load() {
            Ok(Some(data)) => return Ok(data),
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no save file, creating default");
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "unreadable save, replacing with default");
            }
        }
        let data = SaveData::default();
        self.save(&data)?;
        Ok(data)
    }

    /// Load the record. `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<SaveData>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let data = serde_json::from_str(&text)?;
        Ok(Some(data))
    }

    /// Write through a temp file and rename over the target.
    ///
    /// Each call gets its own temp file, so concurrent saves never share a
    /// half-written file; the last rename wins.
    pub fn save(&self, data: &SaveData) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(data)?;
        write_atomic(&self.path, text.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "saved");
        Ok(())
    }
}

/// Write `bytes` to a fresh temp file beside `path`, then rename it over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("save.json"));

        let data = store.load_or_default().unwrap();
        assert_eq!(data, SaveData::default());
        assert!(store.path().exists());
    }

    #[test]
    fn corrupt_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SaveStore::new(&path);

        assert_eq!(store.load_or_default().unwrap(), SaveData::default());
        assert_eq!(store.load().unwrap(), Some(SaveData::default()));
    }

    #[test]
    fn legacy_field_names_and_partial_records_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(
            &path,
            r#"{"player":{"x":3,"y":4},"time":{"time":700,"day":9,"season":2,"year":3,"weekday":5}}"#,
        )
        .unwrap();

        let data = SaveStore::new(&path).load().unwrap().unwrap();
        assert_eq!(data.world, "pasture");
        assert_eq!(data.player, PlayerRecord { x: 3, y: 4 });
        assert_eq!(data.time.minutes_of_day, 700);
        assert_eq!(data.time.month, 2);
        assert_eq!(data.settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("nested").join("save.json"));
        let mut data = SaveData::default();
        data.player = PlayerRecord { x: 42, y: 7 };
        data.settings.fps = 60;

        store.save(&data).unwrap();
        assert_eq!(store.load().unwrap(), Some(data));
    }

    #[test]
    fn overlapping_saves_never_commit_a_partial_file() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::thread;

        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::new(dir.path().join("save.json"));
        let record = |x: i32| SaveData {
            world: "w".repeat(2000 + x as usize),
            player: PlayerRecord { x, y: x },
            ..SaveData::default()
        };
        let (a, b) = (record(1), record(2));
        store.save(&a).unwrap();

        let writing = AtomicBool::new(true);
        thread::scope(|s| {
            let writers: Vec<_> = [&a, &b]
                .into_iter()
                .map(|data| {
                    let store = &store;
                    s.spawn(move || (0..300).filter(|_| store.save(data).is_err()).count())
                })
                .collect();

            let reader = s.spawn(|| {
                let mut reads = 0;
                loop {
                    let got = store.load().unwrap().unwrap();
                    assert!(got == a || got == b, "read a mixed record");
                    reads += 1;
                    if !writing.load(Ordering::Acquire) {
                        break reads;
                    }
                }
            });

            let failed: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();
            writing.store(false, Ordering::Release);
            assert_eq!(failed, 0);
            assert!(reader.join().unwrap() > 0);
        });

        // Only the target remains; every temp file was renamed away.
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("save.json")]);
    }
}
