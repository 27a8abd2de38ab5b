//! Piece module - the falling two-letter piece
//!
//! A piece is two letter cells laid out on a fixed 5x5 template. Cell offsets
//! are local to the template; the anchor places the template's center on the
//! board. Board positions are always derived from `cells` + `anchor` through
//! [`adjust`], never stored.

use crate::rng::LetterSource;
use crate::types::{Pos, LAYOUT_CENTER, LAYOUT_SIZE};

/// Fixed square template with the two fillable offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceLayout {
    pub size: i8,
    /// `(row, col)` offsets of the two letters, symmetric about the center
    pub fills: [(i8, i8); 2],
}

impl PieceLayout {
    pub const fn center(&self) -> (i8, i8) {
        (self.size / 2, self.size / 2)
    }
}

/// The piece template: two letters on the center row, one cell either side
/// of the (empty) center.
pub const PIECE_LAYOUT: PieceLayout = PieceLayout {
    size: LAYOUT_SIZE,
    fills: [(LAYOUT_CENTER, LAYOUT_CENTER - 1), (LAYOUT_CENTER, LAYOUT_CENTER + 1)],
};

/// A letter cell in the layout's local coordinate space.
///
/// `id` is assigned at spawn from the layout offset and survives rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserCell {
    pub r: i8,
    pub c: i8,
    pub letter: char,
    pub id: u8,
}

impl UserCell {
    pub fn pos(&self) -> Pos {
        Pos::new(self.r, self.c)
    }
}

pub type PieceCells = [UserCell; 2];

/// Where new pieces are anchored on a grid `cols` wide
pub fn spawn_pos(cols: u8) -> Pos {
    Pos::new(0, (cols / 2) as i8)
}

/// Rotate cell offsets 90° about the layout center.
///
/// For an offset `(dr, dc)` from the center, clockwise gives `(dc, -dr)` and
/// counter-clockwise `(-dc, dr)`. A cell on the center stays put.
pub fn rotate(cells: &PieceCells, clockwise: bool) -> PieceCells {
    let (cr, cc) = PIECE_LAYOUT.center();
    cells.map(|cell| {
        let dr = cell.r - cr;
        let dc = cell.c - cc;
        let (nr, nc) = if clockwise { (dc, -dr) } else { (-dc, dr) };
        UserCell {
            r: cr + nr,
            c: cc + nc,
            ..cell
        }
    })
}

/// Project layout-local cells onto the board around `anchor`
pub fn adjust(cells: &PieceCells, anchor: Pos) -> PieceCells {
    let (cr, cc) = PIECE_LAYOUT.center();
    cells.map(|cell| UserCell {
        r: cell.r + anchor.row - cr,
        c: cell.c + anchor.col - cc,
        ..cell
    })
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub anchor: Pos,
    pub cells: PieceCells,
}

impl Piece {
    /// Place `letters` on the layout fills, anchored at `anchor`
    pub fn new(anchor: Pos, letters: [char; 2]) -> Self {
        let mut i = 0;
        let cells = PIECE_LAYOUT.fills.map(|(r, c)| {
            let cell = UserCell {
                r,
                c,
                letter: letters[i],
                id: (r * PIECE_LAYOUT.size + c) as u8,
            };
            i += 1;
            cell
        });
        Self { anchor, cells }
    }

    /// Fresh piece at the spawn position with two independently drawn letters
    pub fn spawn(cols: u8, letters: &mut LetterSource) -> Self {
        let first = letters.draw();
        let second = letters.draw();
        Self::new(spawn_pos(cols), [first, second])
    }

    /// Board-space cells
    pub fn adjusted(&self) -> PieceCells {
        adjust(&self.cells, self.anchor)
    }

    /// Board positions of both cells
    pub fn positions(&self) -> [Pos; 2] {
        self.adjusted().map(|cell| cell.pos())
    }

    /// Cells after a 90° turn (the piece itself is unchanged)
    pub fn rotated(&self, clockwise: bool) -> PieceCells {
        rotate(&self.cells, clockwise)
    }

    pub fn with_cells(self, cells: PieceCells) -> Self {
        Self { cells, ..self }
    }

    pub fn shifted(self, dr: i8, dc: i8) -> Self {
        Self {
            anchor: self.anchor.offset(dr, dc),
            ..self
        }
    }

    pub fn bottom_row(&self) -> i8 {
        self.positions().iter().map(|p| p.row).max().unwrap_or(self.anchor.row)
    }

    pub fn left_col(&self) -> i8 {
        self.positions().iter().map(|p| p.col).min().unwrap_or(self.anchor.col)
    }

    pub fn right_col(&self) -> i8 {
        self.positions().iter().map(|p| p.col).max().unwrap_or(self.anchor.col)
    }
}
