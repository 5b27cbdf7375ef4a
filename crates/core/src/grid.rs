//! Grid module - owns the tile storage
//!
//! The grid is a `width x height` array of [`Tile`] records stored flat in
//! row-major order (`y * width + x`) for cache locality.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom).
//!
//! The outermost ring of cells is always the fixed border tile. It is stamped
//! when the grid is created and every mutating helper leaves it alone.

use crate::types::Tile;

/// Flat array-of-structs tile storage with a non-walkable border.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    /// Flat array of tiles, row-major order (y * width + x)
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Create a grid filled with `fill` and stamp the border.
    ///
    /// Zero dimensions are raised to 1 so every grid has at least one cell.
    pub fn new(width: usize, height: usize, fill: Tile) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut grid = Self {
            width,
            height,
            tiles: vec![fill; width * height],
        };
        grid.stamp_border();
        grid
    }

    /// Build a grid from row-major tiles.
    ///
    /// Returns `None` when the tile count does not match the shape or either
    /// dimension is zero. The border is stamped over whatever the caller gave.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Option<Self> {
        if width == 0 || height == 0 || tiles.len() != width * height {
            return None;
        }
        let mut grid = Self {
            width,
            height,
            tiles,
        };
        grid.stamp_border();
        Some(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    /// Get tile at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: i64, y: i64) -> Option<&Tile> {
        self.index(x, y).map(|i| &self.tiles[i])
    }

    /// A full row of tiles, or None if out of bounds.
    pub fn row(&self, y: usize) -> Option<&[Tile]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.tiles[start..start + self.width])
    }

    /// Fill an inclusive rectangle with `tile`, clipped to the interior.
    ///
    /// Corners may be given in any order. Returns the number of tiles written.
    pub fn fill_region(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, tile: Tile) -> usize {
        if self.width < 3 || self.height < 3 {
            return 0;
        }
        let (lx, hx) = (x1.min(x2).max(1), x1.max(x2).min(self.width - 2));
        let (ly, hy) = (y1.min(y2).max(1), y1.max(y2).min(self.height - 2));
        if lx > hx || ly > hy {
            return 0;
        }

        let mut written = 0;
        for y in ly..=hy {
            let start = y * self.width;
            for cell in &mut self.tiles[start + lx..=start + hx] {
                *cell = tile;
                written += 1;
            }
        }
        written
    }

    fn stamp_border(&mut self) {
        let border = Tile::border();
        let (w, h) = (self.width, self.height);
        for x in 0..w {
            self.tiles[x] = border;
            self.tiles[(h - 1) * w + x] = border;
        }
        for y in 0..h {
            self.tiles[y * w] = border;
            self.tiles[y * w + w - 1] = border;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rgb, TerrainKind};

    fn grass() -> Tile {
        Tile::new('.', true, TerrainKind::FIELD, None)
    }

    #[test]
    fn new_grid_has_border_ring() {
        let g = TileGrid::new(5, 4, grass());
        for x in 0..5 {
            assert!(!g.get(x, 0).unwrap().walkable);
            assert!(!g.get(x, 3).unwrap().walkable);
        }
        for y in 0..4 {
            assert!(!g.get(0, y).unwrap().walkable);
            assert!(!g.get(4, y).unwrap().walkable);
        }
        assert!(g.get(2, 2).unwrap().walkable);
    }

    #[test]
    fn out_of_bounds_is_none() {
        let g = TileGrid::new(3, 3, grass());
        assert!(g.get(-1, 0).is_none());
        assert!(g.get(0, -1).is_none());
        assert!(g.get(3, 0).is_none());
        assert!(g.get(0, 3).is_none());
        assert!(g.row(3).is_none());
    }

    #[test]
    fn fill_region_never_touches_border() {
        let mut g = TileGrid::new(6, 6, grass());
        let water = Tile::new('~', false, TerrainKind(7), Some(Rgb::new(0, 0, 255)));
        let written = g.fill_region(10, 10, 0, 0, water);
        assert_eq!(written, 16);
        assert_eq!(*g.get(0, 0).unwrap(), Tile::border());
        assert_eq!(*g.get(5, 5).unwrap(), Tile::border());
        assert_eq!(g.get(1, 1).unwrap().ch, '~');
        assert_eq!(g.get(4, 4).unwrap().ch, '~');
    }

    #[test]
    fn from_tiles_rejects_shape_mismatch_and_stamps_border() {
        assert!(TileGrid::from_tiles(2, 2, vec![grass(); 3]).is_none());
        assert!(TileGrid::from_tiles(0, 2, vec![]).is_none());

        let g = TileGrid::from_tiles(3, 3, vec![grass(); 9]).unwrap();
        assert_eq!(*g.get(0, 1).unwrap(), Tile::border());
        assert!(g.get(1, 1).unwrap().walkable);
    }
}
