//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure; no terminal I/O.

use crate::core::{GameSnapshot, GameStatus};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{GridCoordinate, PieceKind};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Vertical placement of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Field origin plus cell size, shared by the draw helpers.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
    cell_w: u16,
    cell_h: u16,
    rows: u16,
    cols: u16,
}

impl Layout {
    /// Top-left terminal position of a field cell, if it is on the field.
    fn origin(&self, coord: GridCoordinate) -> Option<(u16, u16)> {
        if coord.row < 0
            || coord.col < 0
            || coord.row >= self.rows as i32
            || coord.col >= self.cols as i32
        {
            return None;
        }
        Some((
            self.x + 1 + coord.col as u16 * self.cell_w,
            self.y + 1 + coord.row as u16 * self.cell_h,
        ))
    }
}

pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell keep blocks roughly square.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Draw into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let frame_w = snap.cols * self.cell_w + 2;
        let frame_h = snap.rows * self.cell_h + 2;
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            frame_w,
            frame_h,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            rows: snap.rows,
            cols: snap.cols,
        };

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), FIELD_BG),
        );
        draw_border(fb, &layout);

        let empty = CellStyle::plain(Rgb::new(90, 90, 100), FIELD_BG).dim();
        for row in 0..snap.rows as i32 {
            for col in 0..snap.cols as i32 {
                let coord = GridCoordinate::new(row, col);
                match snap.cell(coord) {
                    Some(kind) => self.block(fb, &layout, coord, kind),
                    None => self.fill(fb, &layout, coord, '·', empty),
                }
            }
        }

        if let (Some(ghost), Some(active)) = (snap.ghost, snap.active) {
            let style = CellStyle::plain(piece_rgb(active.kind).scaled(60), FIELD_BG).dim();
            for coord in ghost {
                self.fill(fb, &layout, coord, '░', style);
            }
        }

        if let Some(active) = snap.active {
            for coord in active.cells {
                self.block(fb, &layout, coord, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        match snap.status {
            GameStatus::GameOver => draw_banner(fb, &layout, &["GAME OVER", "r restart  q quit"]),
            GameStatus::Stopped => draw_banner(fb, &layout, &["STOPPED"]),
            GameStatus::Idle | GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn block(&self, fb: &mut FrameBuffer, layout: &Layout, coord: GridCoordinate, kind: PieceKind) {
        let style = CellStyle::plain(piece_rgb(kind), FIELD_BG).bold();
        self.fill(fb, layout, coord, '█', style);
    }

    fn fill(&self, fb: &mut FrameBuffer, layout: &Layout, coord: GridCoordinate, ch: char, style: CellStyle) {
        if let Some((px, py)) = layout.origin(coord) {
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: &Layout) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x.saturating_add(8) > viewport.width {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.y;
        fb.put_str(panel_x, y, "HOLD", label);
        y += 1;
        match snap.hold {
            Some(kind) => {
                let style = CellStyle {
                    dim: !snap.can_hold,
                    ..CellStyle::plain(piece_rgb(kind), PANEL_BG)
                };
                fb.put_str(panel_x, y, kind.letter(), style);
            }
            None => fb.put_str(panel_x, y, "-", value),
        }
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for kind in &snap.next_queue {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, kind.letter(), CellStyle::plain(piece_rgb(*kind), PANEL_BG));
            y += 1;
        }
        y += 1;

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_u32(panel_x, y + 1, snap.level, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
    }
}

fn piece_rgb(kind: PieceKind) -> Rgb {
    Rgb::from(kind.color())
}

fn draw_border(fb: &mut FrameBuffer, layout: &Layout) {
    let style = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
    let (x, y, w, h) = (layout.x, layout.y, layout.frame_w, layout.frame_h);

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines over the middle of the field.
fn draw_banner(fb: &mut FrameBuffer, layout: &Layout, lines: &[&str]) {
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let top = layout.y + layout.frame_h / 2 - (lines.len() as u16) / 2;
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = layout.x + layout.frame_w.saturating_sub(text_w) / 2;
        fb.put_str(x, top + i as u16, text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_is_centered_on_field() {
        let mut snap = GameSnapshot::default();
        snap.status = GameStatus::GameOver;
        let fb = GameView::default()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(22, 22));
        // 22x22 frame; two banner lines start one row above the middle.
        let row: Vec<char> = fb.row_text(10).chars().collect();
        assert_eq!(row[6..15].iter().collect::<String>(), "GAME OVER");
        assert_eq!(row[0], '│');
        let hint: Vec<char> = fb.row_text(11).chars().collect();
        assert_eq!(hint[2..19].iter().collect::<String>(), "r restart  q quit");
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
