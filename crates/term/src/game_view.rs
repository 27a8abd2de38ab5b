//! GameView: maps a [`RoundSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{AnimSnapshot, RoundSnapshot, RoundState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::Pos;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame landed inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    cell_w: u16,
    cell_h: u16,
}

impl BoardLayout {
    /// Top-left terminal cell of grid cell `pos`
    pub fn cell_origin(&self, pos: Pos) -> (u16, u16) {
        (
            self.start_x + 1 + pos.col.max(0) as u16 * self.cell_w,
            self.start_y + 1 + pos.row.max(0) as u16 * self.cell_h,
        )
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const EMPTY: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
const LETTER: CellStyle = CellStyle::new(Rgb::new(235, 235, 235), Rgb::new(60, 70, 110)).bold();
const MATCHED: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(240, 200, 60)).bold();
const PIECE: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(70, 150, 90)).bold();
const FALLING: CellStyle = CellStyle::new(Rgb::new(235, 235, 235), Rgb::new(90, 90, 140)).bold();
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();

/// A lightweight terminal renderer for a word-tetris round.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, rows: u8, cols: u8, viewport: Viewport) -> BoardLayout {
        let frame_w = cols as u16 * self.cell_w + 2;
        let frame_h = rows as u16 * self.cell_h + 2;
        BoardLayout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            frame_w,
            frame_h,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &RoundSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap.rows, snap.cols, viewport);
        self.draw_border(fb, &layout);

        let falling_from: Vec<Pos> = snap
            .board_falls
            .iter()
            .flat_map(|anim| anim.cells.iter().map(|c| c.from))
            .collect();

        for row in 0..snap.rows as i8 {
            for col in 0..snap.cols as i8 {
                let pos = Pos::new(row, col);
                let cell = snap.cell(pos).unwrap_or_default();
                match cell.letter {
                    Some(letter) if !falling_from.contains(&pos) => {
                        let style = if cell.matched { MATCHED } else { LETTER };
                        self.draw_letter(fb, &layout, pos, letter, style);
                    }
                    _ => self.fill_cell(fb, &layout, pos, '·', EMPTY),
                }
            }
        }

        if let Some(anim) = &snap.board_falls {
            self.draw_anim(fb, &layout, snap, anim, FALLING);
        }
        if let Some(anim) = &snap.instant_drop {
            self.draw_anim(fb, &layout, snap, anim, PIECE);
        }

        if snap.piece_visible {
            // Past the halfway mark the piece is drawn on the row it is
            // falling into, as long as that row is free.
            let lower = snap.fall_progress >= 0.5
                && snap.piece.iter().all(|c| {
                    snap.cell(c.pos.offset(1, 0))
                        .is_some_and(|below| below.letter.is_none())
                });
            for cell in &snap.piece {
                let pos = if lower { cell.pos.offset(1, 0) } else { cell.pos };
                self.draw_letter(fb, &layout, pos, cell.letter, PIECE);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        if snap.game_over {
            self.draw_overlay(fb, &layout, 0, "GAME OVER");
            self.draw_overlay(fb, &layout, 1, "r: restart");
        } else if snap.state == RoundState::Countdown {
            let mut digits = [0u8; 4];
            let text = format_small(snap.countdown_s, &mut digits);
            self.draw_overlay(fb, &layout, 0, text);
        } else if snap.state == RoundState::SpawningBlock && !snap.dictionary_ready {
            self.draw_overlay(fb, &layout, 0, "LOADING WORDS");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RoundSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_anim(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        snap: &RoundSnapshot,
        anim: &AnimSnapshot,
        style: CellStyle,
    ) {
        let t = anim.progress();
        for cell in &anim.cells {
            let span = (cell.to.row - cell.from.row) as f32;
            let row = cell.from.row + (span * t).round() as i8;
            let pos = Pos::new(row.min(snap.rows as i8 - 1), cell.from.col);
            self.draw_letter(fb, layout, pos, cell.letter, style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &BoardLayout) {
        let (x, y, w, h) = (layout.start_x, layout.start_y, layout.frame_w, layout.frame_h);
        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', EMPTY);

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_letter(&self, fb: &mut FrameBuffer, layout: &BoardLayout, pos: Pos, letter: char, style: CellStyle) {
        if pos.row < 0 || pos.col < 0 {
            return;
        }
        self.fill_cell(fb, layout, pos, ' ', style);
        let (px, py) = layout.cell_origin(pos);
        fb.put_char(px, py, letter.to_ascii_uppercase(), style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, layout: &BoardLayout, pos: Pos, ch: char, style: CellStyle) {
        let (px, py) = layout.cell_origin(pos);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, viewport: Viewport, layout: &BoardLayout) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "WORDS", LABEL);
        fb.put_u32(panel_x + 6, y, snap.words.len() as u32, VALUE);
        y = y.saturating_add(1);

        // Newest words at the bottom; older ones scroll off the top.
        let room = (layout.start_y + layout.frame_h).saturating_sub(y) as usize;
        let skip = snap.words.len().saturating_sub(room);
        for word in &snap.words[skip..] {
            fb.put_str(panel_x, y, word, VALUE);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, layout: &BoardLayout, line: u16, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = layout
            .start_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, OVERLAY);
    }
}

/// Format a small number into `buf` without allocating
fn format_small(v: u32, buf: &mut [u8; 4]) -> &str {
    let mut n = v.min(9999);
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 || i == 0 {
            break;
        }
    }
    std::str::from_utf8(&buf[i..]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::{CellSnapshot, PieceCellSnapshot};

    fn snapshot(rows: u8, cols: u8) -> RoundSnapshot {
        RoundSnapshot {
            rows,
            cols,
            cells: vec![CellSnapshot::default(); rows as usize * cols as usize],
            state: RoundState::PlacingBlock,
            dictionary_ready: true,
            ..RoundSnapshot::default()
        }
    }

    #[test]
    fn test_format_small() {
        let mut buf = [0u8; 4];
        assert_eq!(format_small(3, &mut buf), "3");
        assert_eq!(format_small(120, &mut buf), "120");
    }

    #[test]
    fn test_letters_render_uppercase_at_cell_origin() {
        let mut snap = snapshot(7, 7);
        snap.cells[6 * 7 + 2].letter = Some('q');
        let view = GameView::default();
        let viewport = Viewport::new(40, 20);
        let fb = view.render(&snap, viewport);
        let (x, y) = view.layout(7, 7, viewport).cell_origin(Pos::new(6, 2));
        let cell = fb.get(x, y).unwrap();
        assert_eq!(cell.ch, 'Q');
        assert_eq!(cell.style, LETTER);
    }

    #[test]
    fn test_matched_cells_use_highlight() {
        let mut snap = snapshot(7, 7);
        snap.cells[0] = CellSnapshot {
            letter: Some('a'),
            matched: true,
        };
        let view = GameView::default();
        let viewport = Viewport::new(40, 20);
        let fb = view.render(&snap, viewport);
        let (x, y) = view.layout(7, 7, viewport).cell_origin(Pos::new(0, 0));
        assert_eq!(fb.get(x, y).unwrap().style, MATCHED);
    }

    #[test]
    fn test_hidden_piece_is_not_drawn() {
        let mut snap = snapshot(7, 7);
        snap.piece = vec![PieceCellSnapshot {
            pos: Pos::new(0, 2),
            letter: 'e',
            id: 11,
        }];
        snap.piece_visible = false;
        let view = GameView::default();
        let viewport = Viewport::new(40, 20);
        let fb = view.render(&snap, viewport);
        let (x, y) = view.layout(7, 7, viewport).cell_origin(Pos::new(0, 2));
        assert_ne!(fb.get(x, y).unwrap().ch, 'E');
    }
}
