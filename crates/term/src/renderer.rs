//! TerminalRenderer: owns the terminal writer and encodes map diffs.
//!
//! Frames are never written cell by cell. Each changed run of adjacent cells
//! in a row becomes one cursor move followed by the run's characters, and the
//! whole frame is queued into one byte buffer before a single flush.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::ViewportFrame;
use crate::fb::FrameBuffer;
use crate::types::Rgb;

/// What a diff pass emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Positioned writes (one per changed run).
    pub runs: usize,
    /// Cells covered by those writes.
    pub cells: usize,
    /// The previous frame was discarded before diffing.
    pub full: bool,
}

/// Screen position of the map's top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    pub col: u16,
    pub row: u16,
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Raw input, alternate screen, hidden cursor.
    ///
    /// Undone by [`exit`](Self::exit), or on drop if the caller never got
    /// that far.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Scratch buffer for the frame being built. Cleared by `flush_buf`.
    pub(crate) fn buf_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }

    pub(crate) fn flush_buf(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.out.write_all(&self.buf)?;
            self.out.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Reconcile `next` against `prev` and queue the changed runs into `out`.
///
/// A shape mismatch discards `prev` first, so every cell is redrawn. Cells
/// that match `prev` emit nothing. Every written cell is copied into `prev`.
pub fn encode_diff_into(
    prev: &mut FrameBuffer,
    next: &ViewportFrame,
    origin: Origin,
    color: bool,
    out: &mut Vec<u8>,
) -> Result<FrameStats> {
    let mut stats = FrameStats::default();
    if !prev.same_shape(next.width, next.height) {
        prev.reset(next.width, next.height);
        stats.full = true;
    }

    let mut current: Option<Option<Rgb>> = None;
    for row in 0..next.height {
        let glyphs = next.row(row);
        let mut col = 0;
        while col < next.width {
            if prev.get(col, row) == Some(glyphs[col]) {
                col += 1;
                continue;
            }

            let start = col;
            while col < next.width && prev.get(col, row) != Some(glyphs[col]) {
                col += 1;
            }

            out.queue(cursor::MoveTo(
                origin.col.saturating_add(start as u16),
                origin.row.saturating_add(row as u16),
            ))?;
            for (x, g) in (start..col).zip(&glyphs[start..col]) {
                if color && current != Some(g.color) {
                    apply_color_into(out, g.color)?;
                    current = Some(g.color);
                }
                out.queue(Print(g.ch))?;
                prev.set(x, row, *g);
            }

            stats.runs += 1;
            stats.cells += col - start;
        }
    }

    if current.is_some() {
        out.queue(ResetColor)?;
    }
    Ok(stats)
}

fn apply_color_into(out: &mut Vec<u8>, color: Option<Rgb>) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(color)))?;
    Ok(())
}

fn rgb_to_color(rgb: Option<Rgb>) -> Color {
    match rgb {
        Some(Rgb { r, g, b }) => Color::Rgb { r, g, b },
        None => Color::Reset,
    }
}
