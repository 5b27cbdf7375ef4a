//! Map files.
//!
//! A map is stored as `<dir>/<name>.json`. Instead of one record per cell the
//! file carries a legend of distinct tiles and one string per row, where each
//! character is a legend key:
//!
//! ```json
//! {
//!   "name": "pasture",
//!   "width": 4,
//!   "height": 3,
//!   "legend": {
//!     "#": { "ch": "#", "walkable": false, "terrain": 0, "color": [128, 128, 128] },
//!     ".": { "ch": ".", "walkable": true, "terrain": 0, "color": null }
//!   },
//!   "rows": ["####", "#..#", "####"]
//! }
//! ```
//!
//! The border invariant is re-applied on load, whatever the file says.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{TileGrid, World};
use crate::error::MapError;
use crate::save::write_atomic;
use crate::types::{Rgb, TerrainKind, Tile};

#[derive(Debug, Serialize, Deserialize)]
struct MapFile {
    name: String,
    width: usize,
    height: usize,
    legend: BTreeMap<String, LegendEntry>,
    rows: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LegendEntry {
    ch: char,
    walkable: bool,
    #[serde(default)]
    terrain: u8,
    #[serde(default)]
    color: Option<[u8; 3]>,
}

impl From<LegendEntry> for Tile {
    fn from(e: LegendEntry) -> Self {
        Tile::new(
            e.ch,
            e.walkable,
            TerrainKind(e.terrain),
            e.color.map(|[r, g, b]| Rgb::new(r, g, b)),
        )
    }
}

impl From<Tile> for LegendEntry {
    fn from(t: Tile) -> Self {
        Self {
            ch: t.ch,
            walkable: t.walkable,
            terrain: t.terrain.0,
            color: t.color.map(|c| [c.r, c.g, c.b]),
        }
    }
}

/// Directory of named maps.
#[derive(Debug, Clone)]
pub struct MapStore {
    dir: PathBuf,
}

impl MapStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Load a map by name. A missing file is `MapError::NotFound`.
    pub fn load(&self, name: &str) -> Result<World, MapError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(MapError::NotFound(name.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        let file: MapFile = serde_json::from_str(&text)?;
        let world = decode(file)?;
        tracing::info!(
            name = world.name(),
            width = world.width(),
            height = world.height(),
            "map loaded"
        );
        Ok(world)
    }

    pub fn save(&self, world: &World) -> Result<(), MapError> {
        let path = self.path_for(world.name());
        let text = serde_json::to_string(&encode(world)?)?;
        write_atomic(&path, text.as_bytes())?;
        tracing::debug!(path = %path.display(), "map saved");
        Ok(())
    }
}

fn decode(file: MapFile) -> Result<World, MapError> {
    if file.width == 0 || file.height == 0 {
        return Err(MapError::InvalidShape(format!(
            "{}x{} has no cells",
            file.width, file.height
        )));
    }
    if file.rows.len() != file.height {
        return Err(MapError::InvalidShape(format!(
            "expected {} rows, found {}",
            file.height,
            file.rows.len()
        )));
    }

    let mut legend = HashMap::with_capacity(file.legend.len());
    for (key, entry) in &file.legend {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                legend.insert(c, Tile::from(*entry));
            }
            _ => {
                return Err(MapError::InvalidShape(format!(
                    "legend key {key:?} is not a single character"
                )))
            }
        }
    }

    let mut tiles = Vec::with_capacity(file.width * file.height);
    for (y, row) in file.rows.iter().enumerate() {
        let before = tiles.len();
        for c in row.chars() {
            let tile = legend.get(&c).ok_or_else(|| {
                MapError::InvalidShape(format!("row {y}: unknown legend key {c:?}"))
            })?;
            tiles.push(*tile);
        }
        if tiles.len() - before != file.width {
            return Err(MapError::InvalidShape(format!(
                "row {y}: expected {} cells, found {}",
                file.width,
                tiles.len() - before
            )));
        }
    }

    let grid = TileGrid::from_tiles(file.width, file.height, tiles)
        .ok_or_else(|| MapError::InvalidShape("tile count mismatch".to_string()))?;
    Ok(World::new(file.name, grid))
}

fn encode(world: &World) -> Result<MapFile, MapError> {
    let grid = world.grid();
    let mut keys: HashMap<Tile, char> = HashMap::new();
    let mut legend = BTreeMap::new();
    let mut rows = Vec::with_capacity(grid.height());

    for y in 0..grid.height() {
        let Some(row) = grid.row(y) else { break };
        let mut line = String::with_capacity(row.len());
        for tile in row {
            let key = match keys.get(tile) {
                Some(k) => *k,
                None => {
                    let k = legend_key(keys.len()).ok_or_else(|| {
                        MapError::InvalidShape("too many distinct tiles".to_string())
                    })?;
                    keys.insert(*tile, k);
                    legend.insert(k.to_string(), LegendEntry::from(*tile));
                    k
                }
            };
            line.push(key);
        }
        rows.push(line);
    }

    Ok(MapFile {
        name: world.name().to_string(),
        width: grid.width(),
        height: grid.height(),
        legend,
        rows,
    })
}

/// Key for the i-th distinct tile: printable ASCII first, then Latin-1 and up.
fn legend_key(i: usize) -> Option<char> {
    const ASCII: usize = (b'~' - b'!' + 1) as usize;
    if i < ASCII {
        return Some((b'!' + i as u8) as char);
    }
    char::from_u32(0xA1 + (i - ASCII) as u32)
}

/// The default map: open ground with a blue field patch.
pub fn generate_pasture(width: usize, height: usize) -> World {
    let mut grid = TileGrid::new(width, height, Tile::new('.', true, TerrainKind::UNSET, None));
    grid.fill_region(
        50,
        50,
        100,
        100,
        Tile::new('.', true, TerrainKind::FIELD, Some(Rgb::new(0, 0, 255))),
    );
    World::new("pasture", grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_map_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = MapStore::new(dir.path()).load("nowhere").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn saved_map_loads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let store = MapStore::new(dir.path().join("maps"));
        let world = generate_pasture(120, 110);

        store.save(&world).unwrap();
        let loaded = store.load("pasture").unwrap();
        assert_eq!(loaded, world);
    }

    #[test]
    fn concurrent_saves_leave_one_whole_map() {
        let dir = tempfile::tempdir().unwrap();
        let store = MapStore::new(dir.path());
        let small = generate_pasture(60, 60);
        let large = generate_pasture(160, 140);

        std::thread::scope(|s| {
            for world in [&small, &large] {
                let store = &store;
                s.spawn(move || {
                    for _ in 0..20 {
                        store.save(world).unwrap();
                    }
                });
            }
        });

        let loaded = store.load("pasture").unwrap();
        assert!(loaded == small || loaded == large);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn load_restamps_border() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("open.json"),
            r#"{"name":"open","width":3,"height":3,
                "legend":{".":{"ch":".","walkable":true}},
                "rows":["...","...","..."]}"#,
        )
        .unwrap();

        let world = MapStore::new(dir.path()).load("open").unwrap();
        assert!(!world.is_walkable(0, 0));
        assert!(world.is_walkable(1, 1));
        assert_eq!(world.get_tile(2, 2), Some(&Tile::border()));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("bad.json"),
            r#"{"name":"bad","width":3,"height":2,
                "legend":{".":{"ch":".","walkable":true}},
                "rows":["...",".."]}"#,
        )
        .unwrap();

        let err = MapStore::new(dir.path()).load("bad").unwrap_err();
        assert!(matches!(err, MapError::InvalidShape(_)));
    }

    #[test]
    fn pasture_has_blue_field() {
        let world = generate_pasture(200, 200);
        let field = world.get_tile(75, 75).unwrap();
        assert_eq!(field.terrain, TerrainKind::FIELD);
        assert_eq!(field.color, Some(Rgb::new(0, 0, 255)));
        assert_eq!(world.get_tile(10, 10).unwrap().terrain, TerrainKind::UNSET);
    }
}
