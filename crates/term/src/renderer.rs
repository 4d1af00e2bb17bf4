//! TerminalRenderer: flushes framebuffers to the terminal as changed runs.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::{GameSnapshot, RenderSink};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{GameView, Viewport};

/// Owns the terminal for the duration of a session.
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    view: GameView,
    /// Frame being drawn.
    next: FrameBuffer,
    /// Frame on screen; `None` forces a full redraw.
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    viewport: Option<Viewport>,
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
    /// Render to an arbitrary writer with a fixed viewport, skipping terminal
    /// size queries.
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            view: GameView::default(),
            next: FrameBuffer::new(0, 0),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            viewport: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_view(mut self, view: GameView) -> Self {
        self.view = view;
        self
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.last = None;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
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

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn current_viewport(&self) -> Viewport {
        match self.viewport {
            Some(viewport) => viewport,
            None => {
                let (w, h) = terminal::size().unwrap_or((80, 24));
                Viewport::new(w, h)
            }
        }
    }

    /// Diff `self.next` against the screen and write the changes.
    fn flush_frame(&mut self) -> Result<()> {
        self.buf.clear();
        let (w, h) = (self.next.width(), self.next.height());
        match self.last.as_mut() {
            Some(prev) if prev.width() == w && prev.height() == h => {
                encode_diff_into(prev, &self.next, &mut self.buf)?;
                std::mem::swap(prev, &mut self.next);
            }
            Some(prev) => {
                encode_full_into(&self.next, &mut self.buf)?;
                prev.clone_from(&self.next);
            }
            None => {
                encode_full_into(&self.next, &mut self.buf)?;
                self.last = Some(self.next.clone());
            }
        }
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> RenderSink for TerminalRenderer<W> {
    fn present(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let viewport = self.current_viewport();
        self.view.render_into(snapshot, viewport, &mut self.next);
        self.flush_frame()
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut current: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs that differ between `prev` and `next`. Both must have
/// the same size. Writes nothing when the frames are identical.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<CellStyle> = None;
    let runs = changed_runs(prev, next);
    if runs.is_empty() {
        return Ok(());
    }
    for (x, y, len) in runs {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            let cell = next.get(x + dx, y).unwrap_or_default();
            if current != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Maximal horizontal runs `(x, y, len)` of cells that differ.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let w = next.width() as usize;
    let mut runs = Vec::new();
    if w == 0 {
        return runs;
    }
    for (y, (a, b)) in prev
        .cells()
        .chunks(w)
        .zip(next.cells().chunks(w))
        .enumerate()
    {
        let mut x = 0;
        while x < w {
            if a[x] == b[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && a[x] != b[x] {
                x += 1;
            }
            runs.push((start as u16, y as u16, (x - start) as u16));
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.set(x, 0, Cell::new('X', style));
        }
        b.set(5, 1, Cell::new('Y', style));
        assert_eq!(changed_runs(&a, &b), vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn identical_frames_encode_nothing() {
        let a = FrameBuffer::new(4, 4);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn second_identical_present_writes_nothing() {
        let snap = GameSnapshot::default();
        let mut renderer =
            TerminalRenderer::with_writer(Vec::new()).with_viewport(Viewport::new(40, 24));
        renderer.present(&snap).unwrap();
        let first = renderer.writer().len();
        assert!(first > 0);
        renderer.present(&snap).unwrap();
        assert_eq!(renderer.writer().len(), first);
    }
}
