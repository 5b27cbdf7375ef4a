//! Previous-frame buffer for diff rendering.

use crate::types::Glyph;

/// What the renderer believes is currently visible in the map area.
///
/// Cells start as `None` ("unknown"), which never matches a real glyph, so
/// a freshly reset buffer forces every cell to be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Option<Glyph>>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn same_shape(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }

    /// Reallocate at the new shape with every cell unknown.
    pub fn reset(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, None);
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Last drawn glyph at (x, y); `None` if unknown or out of range.
    pub fn get(&self, x: usize, y: usize) -> Option<Glyph> {
        self.idx(x, y).and_then(|i| self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, glyph: Glyph) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = Some(glyph);
        }
    }

    /// Number of cells with a known glyph.
    pub fn known_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_forgets_everything() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.set(1, 1, Glyph::new('x', None));
        assert_eq!(fb.known_cells(), 1);

        fb.reset(3, 1);
        assert!(fb.same_shape(3, 1));
        assert_eq!(fb.known_cells(), 0);
        assert_eq!(fb.get(1, 1), None);
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.set(5, 0, Glyph::default());
        assert_eq!(fb.known_cells(), 0);
    }
}
