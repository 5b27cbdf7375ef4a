//! WorldRenderer: draws a world around the player onto the terminal.
//!
//! Screen layout (rows):
//!
//! ```text
//! 0        header: date (weekday) time, right-aligned
//! 1        blank
//! 2..2+h   map viewport (diffed against the previous frame)
//! 2+h      blank
//! 3+h      notification line
//! 4+h      key hint
//! ```
//!
//! Header, notification, and hint are plain text lines; only the map area
//! goes through the cell diff.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::Print,
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use unicode_width::UnicodeWidthStr;

use crate::core::{Clock, Localize, Player, World};
use crate::fb::FrameBuffer;
use crate::renderer::{encode_diff_into, FrameStats, Origin, TerminalRenderer};
use crate::types::RESERVED_ROWS;

/// Row where the map starts.
const MAP_TOP: u16 = 2;

/// Terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub width: u16,
    pub height: u16,
}

impl TermSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Current terminal size, 80x24 if it cannot be queried.
    pub fn probe() -> Self {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        Self::new(w, h)
    }
}

/// Everything one frame reads.
pub struct Scene<'a> {
    pub world: &'a World,
    pub player: &'a Player,
    pub clock: Option<&'a Clock>,
    pub locale: &'a dyn Localize,
    /// New notification text, if one arrived since the last frame.
    pub notice: Option<&'a str>,
}

pub struct WorldRenderer<W: Write = io::Stdout> {
    term: TerminalRenderer<W>,
    /// Requested map width in columns; 0 fits the terminal.
    view_w: u16,
    /// Requested map height in rows; 0 fits the terminal.
    view_h: u16,
    color: bool,
    prev: FrameBuffer,
    header: Option<(u16, String)>,
    hint_row: Option<u16>,
    notice: Option<String>,
}

impl WorldRenderer<io::Stdout> {
    pub fn new(view_w: u16, view_h: u16) -> Self {
        Self::with_terminal(TerminalRenderer::new(), view_w, view_h)
    }
}

impl<W: Write> WorldRenderer<W> {
    pub fn with_terminal(term: TerminalRenderer<W>, view_w: u16, view_h: u16) -> Self {
        Self {
            term,
            view_w,
            view_h,
            color: true,
            prev: FrameBuffer::default(),
            header: None,
            hint_row: None,
            notice: None,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn terminal(&self) -> &TerminalRenderer<W> {
        &self.term
    }

    pub fn terminal_mut(&mut self) -> &mut TerminalRenderer<W> {
        &mut self.term
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.prev
    }

    /// Map viewport size for a terminal of `size` showing `world`.
    pub fn view_size(&self, world: &World, size: TermSize) -> (usize, usize) {
        let room_h = size.height.saturating_sub(RESERVED_ROWS);
        let w = if self.view_w > 0 { self.view_w } else { size.width };
        let h = if self.view_h > 0 { self.view_h } else { room_h };
        let w = (w.min(size.width) as usize).min(world.width());
        let h = (h.min(room_h) as usize).min(world.height());
        (w, h)
    }

    /// Draw one frame and return what the map diff emitted.
    pub fn draw(&mut self, scene: &Scene<'_>, size: TermSize) -> Result<FrameStats> {
        let (w, h) = self.view_size(scene.world, size);
        let frame = scene.world.get_viewport(
            scene.player.x,
            scene.player.y,
            w,
            h,
            Some(scene.player.position()),
        );

        if !self.prev.same_shape(frame.width, frame.height) {
            // The old layout may have left text anywhere.
            self.term.buf_mut().queue(Clear(ClearType::All))?;
            self.header = None;
            self.hint_row = None;
        }

        if let Some(clock) = scene.clock {
            let text = format!(
                "{} ({}) {}",
                clock.date_text(scene.locale),
                clock.week_text(scene.locale),
                clock.time_text()
            );
            self.draw_header(text, size.width)?;
        }

        let origin = Origin {
            col: 0,
            row: MAP_TOP,
        };
        let color = self.color;
        let stats = encode_diff_into(&mut self.prev, &frame, origin, color, self.term.buf_mut())?;

        let notice_row = MAP_TOP + frame.height as u16 + 1;
        let hint_row = notice_row + 1;
        if let Some(text) = scene.notice {
            self.notice = Some(text.to_string());
            self.draw_line(notice_row, text)?;
        } else if stats.full {
            if let Some(text) = self.notice.clone() {
                self.draw_line(notice_row, &text)?;
            }
        }
        if self.hint_row != Some(hint_row) {
            let hint = scene.locale.format("ui", "hint", &[]);
            self.draw_line(hint_row, &hint)?;
            self.hint_row = Some(hint_row);
        }

        self.term.flush_buf()?;
        Ok(stats)
    }

    fn draw_header(&mut self, text: String, term_w: u16) -> Result<()> {
        if self.header.as_ref() == Some(&(term_w, text.clone())) {
            return Ok(());
        }
        let text_w = UnicodeWidthStr::width(text.as_str()) as u16;
        let x = term_w.saturating_sub(text_w).saturating_sub(1);
        let buf = self.term.buf_mut();
        buf.queue(cursor::MoveTo(0, 0))?;
        buf.queue(Clear(ClearType::CurrentLine))?;
        buf.queue(cursor::MoveTo(x, 0))?;
        buf.queue(Print(&text))?;
        self.header = Some((term_w, text));
        Ok(())
    }

    /// Clear `row` completely, then write `text` from column 0.
    fn draw_line(&mut self, row: u16, text: &str) -> Result<()> {
        let buf = self.term.buf_mut();
        buf.queue(cursor::MoveTo(0, row))?;
        buf.queue(Clear(ClearType::CurrentLine))?;
        buf.queue(Print(text))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NoLocale, TileGrid};
    use crate::types::Tile;

    fn renderer(view_w: u16, view_h: u16) -> WorldRenderer<Vec<u8>> {
        WorldRenderer::with_terminal(TerminalRenderer::with_writer(Vec::new()), view_w, view_h)
    }

    #[test]
    fn auto_fit_leaves_reserved_rows() {
        let world = World::new("t", TileGrid::new(1000, 1000, Tile::default()));
        let r = renderer(0, 0);
        assert_eq!(r.view_size(&world, TermSize::new(80, 24)), (80, 19));
    }

    #[test]
    fn explicit_size_is_clamped_to_world_and_terminal() {
        let world = World::new("t", TileGrid::new(30, 8, Tile::default()));
        let r = renderer(50, 20);
        assert_eq!(r.view_size(&world, TermSize::new(80, 24)), (30, 8));
        assert_eq!(r.view_size(&world, TermSize::new(20, 10)), (20, 5));
    }

    #[test]
    fn header_is_rewritten_only_when_text_changes() {
        let world = World::new("t", TileGrid::new(10, 10, Tile::default()));
        let player = Player::new(5, 5);
        let mut clock = Clock::new();
        let mut r = renderer(6, 4);
        let size = TermSize::new(40, 20);

        let scene = Scene {
            world: &world,
            player: &player,
            clock: Some(&clock),
            locale: &NoLocale,
            notice: None,
        };
        r.draw(&scene, size).unwrap();
        let before = r.terminal().writer().len();
        r.draw(&scene, size).unwrap();
        assert_eq!(r.terminal().writer().len(), before);

        clock.tick(1);
        let scene = Scene {
            world: &world,
            player: &player,
            clock: Some(&clock),
            locale: &NoLocale,
            notice: None,
        };
        r.draw(&scene, size).unwrap();
        assert!(r.terminal().writer().len() > before);
    }
}
