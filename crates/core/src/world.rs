//! World module - a named tile grid and the viewport window over it
//!
//! All coordinate queries are total: anything outside the grid answers
//! "not walkable" / "no tile" instead of failing, so movement and rendering
//! never branch on errors.

use crate::grid::TileGrid;
use crate::types::{Glyph, Position, Tile, PLAYER_COLOR, PLAYER_GLYPH};

/// The loaded map for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    name: String,
    grid: TileGrid,
}

/// A rectangular window of glyphs cut out of the world.
///
/// `left`/`top` are the world coordinates of the window's top-left cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportFrame {
    pub width: usize,
    pub height: usize,
    pub left: usize,
    pub top: usize,
    cells: Vec<Glyph>,
}

impl ViewportFrame {
    /// Glyph at window-local (col, row).
    pub fn get(&self, col: usize, row: usize) -> Option<Glyph> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    pub fn row(&self, row: usize) -> &[Glyph] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Whether world coordinate `pos` falls inside the window.
    pub fn contains(&self, pos: Position) -> bool {
        let (x, y) = (pos.x as i64, pos.y as i64);
        x >= self.left as i64
            && y >= self.top as i64
            && x < (self.left + self.width) as i64
            && y < (self.top + self.height) as i64
    }
}

impl World {
    pub fn new(name: impl Into<String>, grid: TileGrid) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// False for any out-of-range coordinate, otherwise the tile's flag.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).is_some_and(|t| t.walkable)
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.grid.get(x as i64, y as i64)
    }

    /// Cut a `view_w x view_h` window centered on (center_x, center_y).
    ///
    /// The window size is first clamped to the grid size and the window is
    /// pushed flush against the boundary when the center is near an edge:
    /// `left = clamp(center_x - view_w / 2, 0, width - view_w)`, same for top.
    ///
    /// When `cursor` lies inside the window that cell shows the player marker.
    /// The world itself is never modified.
    pub fn get_viewport(
        &self,
        center_x: i32,
        center_y: i32,
        view_w: usize,
        view_h: usize,
        cursor: Option<Position>,
    ) -> ViewportFrame {
        let (w, h) = (self.width(), self.height());
        let view_w = view_w.min(w);
        let view_h = view_h.min(h);

        let left = clamp_origin(center_x as i64, view_w, w);
        let top = clamp_origin(center_y as i64, view_h, h);

        let mut cells = Vec::with_capacity(view_w * view_h);
        for y in top..top + view_h {
            if let Some(row) = self.grid.row(y) {
                cells.extend(row[left..left + view_w].iter().map(Tile::glyph));
            }
        }

        let mut frame = ViewportFrame {
            width: view_w,
            height: view_h,
            left,
            top,
            cells,
        };

        if let Some(pos) = cursor {
            if frame.contains(pos) {
                let col = pos.x as usize - left;
                let row = pos.y as usize - top;
                frame.cells[row * view_w + col] = Glyph::new(PLAYER_GLYPH, Some(PLAYER_COLOR));
            }
        }

        frame
    }

    /// Closest walkable cell to `from`, searching rings of growing radius.
    ///
    /// Returns `from` itself when it is already walkable and `None` when the
    /// grid has no walkable cell at all.
    pub fn nearest_walkable(&self, from: Position) -> Option<Position> {
        if self.is_walkable(from.x, from.y) {
            return Some(from);
        }
        let x = (from.x as i64).clamp(0, self.width() as i64 - 1) as i32;
        let y = (from.y as i64).clamp(0, self.height() as i64 - 1) as i32;
        let max_r = self.width().max(self.height()) as i32;

        let hit = |dx: i32, dy: i32| {
            let p = Position::new(x + dx, y + dy);
            self.is_walkable(p.x, p.y).then_some(p)
        };
        if let Some(p) = hit(0, 0) {
            return Some(p);
        }

        // Only the ring's perimeter, row-major within the ring.
        for r in 1..=max_r {
            for dx in -r..=r {
                if let Some(p) = hit(dx, -r) {
                    return Some(p);
                }
            }
            for dy in (1 - r)..r {
                if let Some(p) = hit(-r, dy).or_else(|| hit(r, dy)) {
                    return Some(p);
                }
            }
            for dx in -r..=r {
                if let Some(p) = hit(dx, r) {
                    return Some(p);
                }
            }
        }
        None
    }
}

fn clamp_origin(center: i64, view: usize, extent: usize) -> usize {
    let max = (extent - view) as i64;
    (center - (view / 2) as i64).clamp(0, max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rgb, TerrainKind};

    fn world(w: usize, h: usize) -> World {
        World::new("test", TileGrid::new(w, h, Tile::default()))
    }

    #[test]
    fn viewport_centers_when_far_from_edges() {
        let w = world(100, 100);
        let v = w.get_viewport(50, 40, 11, 7, None);
        assert_eq!((v.left, v.top), (45, 37));
        assert!(v.contains(Position::new(50, 40)));
    }

    #[test]
    fn viewport_is_flush_against_edges() {
        let w = world(100, 50);
        let v = w.get_viewport(1, 1, 20, 10, None);
        assert_eq!((v.left, v.top), (0, 0));

        let v = w.get_viewport(99, 49, 20, 10, None);
        assert_eq!((v.left, v.top), (80, 40));
    }

    #[test]
    fn viewport_size_is_clamped_to_grid() {
        let w = world(8, 6);
        let v = w.get_viewport(4, 3, 50, 20, None);
        assert_eq!((v.width, v.height, v.left, v.top), (8, 6, 0, 0));
        assert_eq!(v.get(0, 0).unwrap().ch, '#');
    }

    #[test]
    fn cursor_overrides_only_the_presentation() {
        let mut grid = TileGrid::new(10, 10, Tile::default());
        let tile = Tile::new(',', true, TerrainKind::PATH, Some(Rgb::new(1, 2, 3)));
        grid.fill_region(5, 5, 5, 5, tile);
        let w = World::new("t", grid);

        let v = w.get_viewport(5, 5, 5, 5, Some(Position::new(5, 5)));
        let g = v.get(5 - v.left, 5 - v.top).unwrap();
        assert_eq!(g, Glyph::new(PLAYER_GLYPH, Some(PLAYER_COLOR)));
        assert_eq!(w.get_tile(5, 5), Some(&tile));
    }

    #[test]
    fn cursor_outside_window_is_ignored() {
        let w = world(30, 30);
        let v = w.get_viewport(5, 5, 5, 5, Some(Position::new(25, 25)));
        assert!((0..v.height).all(|r| v.row(r).iter().all(|g| g.ch != PLAYER_GLYPH)));
    }

    #[test]
    fn nearest_walkable_steps_off_the_border() {
        let w = world(10, 10);
        assert_eq!(w.nearest_walkable(Position::new(4, 4)), Some(Position::new(4, 4)));
        let p = w.nearest_walkable(Position::new(0, 0)).unwrap();
        assert!(w.is_walkable(p.x, p.y));
        assert_eq!(p, Position::new(1, 1));

        let solid = world(2, 2);
        assert_eq!(solid.nearest_walkable(Position::new(0, 0)), None);
    }

    #[test]
    fn nearest_walkable_prefers_closer_rings_then_row_order() {
        let wall = Tile::new('~', false, TerrainKind::UNSET, None);
        let mut grid = TileGrid::new(20, 20, wall);
        let open = Tile::default();
        grid.fill_region(14, 10, 14, 10, open);
        grid.fill_region(10, 13, 10, 13, open);
        grid.fill_region(12, 12, 12, 12, open);
        let w = World::new("t", grid);

        // (12,12) is on ring 2; (10,13) is on ring 3 and (14,10) on ring 4.
        assert_eq!(w.nearest_walkable(Position::new(10, 10)), Some(Position::new(12, 12)));
        assert_eq!(w.nearest_walkable(Position::new(10, 16)), Some(Position::new(10, 13)));
    }

    #[test]
    fn nearest_walkable_on_a_large_solid_map_gives_up() {
        let wall = Tile::new('~', false, TerrainKind::UNSET, None);
        let w = World::new("rock", TileGrid::new(1000, 1000, wall));
        assert_eq!(w.nearest_walkable(Position::new(500, 500)), None);
    }
}
