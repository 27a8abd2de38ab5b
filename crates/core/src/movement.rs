//! Movement module - collision checks and piece physics
//!
//! All predicates look at the piece's current board cells against the grid.
//! Every move is all-or-nothing: when its guard fails the piece is left
//! untouched and the call returns `false`.
//!
//! The sub-row fall progress (`interp`) lives in [`FallPhysics`], which the
//! round owns and resets on spawn and lock.

use crate::grid::Grid;
use crate::piece::{adjust, spawn_pos, Piece, PieceCells, UserCell, PIECE_LAYOUT};
use crate::types::{Pos, FALL_RATE, INTERP_MAX, KEYDOWN_MULTIPLIER};

/// Index of the first cell that is out of bounds or lands on a letter
fn first_blocked(grid: &Grid, cells: &[UserCell]) -> Option<usize> {
    cells.iter().position(|cell| !grid.is_empty(cell.pos()))
}

/// Whether every cell of `piece` sits on an empty in-bounds cell
pub fn fits(grid: &Grid, piece: &Piece) -> bool {
    first_blocked(grid, &piece.adjusted()).is_none()
}

/// True iff every cell shifted by `(dr, dc)` is in bounds and empty
pub fn target_empty(grid: &Grid, piece: &Piece, dr: i8, dc: i8) -> bool {
    piece
        .positions()
        .iter()
        .all(|p| grid.is_empty(p.offset(dr, dc)))
}

/// True iff any cell is at or below the resting row of its column
pub fn touching_ground(grid: &Grid, piece: &Piece) -> bool {
    piece
        .positions()
        .iter()
        .any(|p| p.row >= grid.ground_height(p.col, p.row))
}

/// True when a freshly spawned piece would overlap a letter
pub fn spawn_blocked(grid: &Grid) -> bool {
    let anchor = spawn_pos(grid.cols());
    let (cr, cc) = PIECE_LAYOUT.center();
    PIECE_LAYOUT
        .fills
        .iter()
        .any(|&(r, c)| !grid.is_empty(Pos::new(r + anchor.row - cr, c + anchor.col - cc)))
}

/// Anchor row at which an instant drop comes to rest.
///
/// Each cell can fall as far as its column's ground; the cell with the least
/// room decides, so every cell lands without overlapping and at least one
/// rests exactly on its ground.
pub fn instant_drop_row(grid: &Grid, piece: &Piece) -> i8 {
    let (cr, _) = PIECE_LAYOUT.center();
    piece
        .cells
        .iter()
        .zip(piece.adjusted().iter())
        .map(|(local, board)| {
            let ground = grid.ground_height(board.c, board.r);
            ground - (local.r - cr)
        })
        .min()
        .unwrap_or(piece.anchor.row)
}

/// Fall tuning and the interpolation accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallPhysics {
    /// Sub-row progress toward the next row, in `0..INTERP_MAX` at rest
    pub interp: u32,
    /// Smooth-fall mode: soft drop feeds the accumulator instead of moving rows
    pub smooth: bool,
    pub fall_rate: u32,
    pub keydown_multiplier: u32,
}

impl Default for FallPhysics {
    fn default() -> Self {
        Self {
            interp: 0,
            smooth: true,
            fall_rate: FALL_RATE,
            keydown_multiplier: KEYDOWN_MULTIPLIER,
        }
    }
}

impl FallPhysics {
    pub fn new(smooth: bool, fall_rate: u32, keydown_multiplier: u32) -> Self {
        Self {
            interp: 0,
            smooth,
            fall_rate,
            keydown_multiplier,
        }
    }

    pub fn reset(&mut self) {
        self.interp = 0;
    }

    /// Rows of pending fall, rounded up
    pub fn pending_rows(&self) -> i8 {
        self.interp.div_ceil(INTERP_MAX) as i8
    }

    /// Fraction of a row the piece has visually fallen, in `[0, 1)`
    pub fn progress(&self) -> f32 {
        (self.interp % INTERP_MAX) as f32 / INTERP_MAX as f32
    }

    /// Shift the piece one column left (`dc = -1`) or right (`dc = 1`)
    pub fn try_move_horizontal(&mut self, grid: &Grid, piece: &mut Piece, dc: i8) -> bool {
        let edge = if dc < 0 {
            piece.left_col() + dc
        } else {
            piece.right_col() + dc
        };
        if !grid.in_col_bounds(edge) || !target_empty(grid, piece, 0, dc) {
            return false;
        }
        // Mid-interpolation the piece is drawn partly in lower rows; do not let
        // it slide to a spot whose landing row is off the board.
        if self.smooth && !grid.in_row_bounds(piece.bottom_row() + self.pending_rows()) {
            return false;
        }
        *piece = piece.shifted(0, dc);
        true
    }

    /// Accelerate the fall (smooth mode) or drop one row (discrete mode)
    pub fn soft_drop(&mut self, grid: &Grid, piece: &mut Piece) -> bool {
        let below = piece.bottom_row() + 1;
        if !grid.in_row_bounds(below) || !target_empty(grid, piece, 1, 0) {
            return false;
        }
        if self.smooth {
            self.interp += self.fall_rate * self.keydown_multiplier;
        } else {
            *piece = piece.shifted(1, 0);
            self.interp = 0;
        }
        true
    }

    /// Rotate 90° with a single corrective kick.
    ///
    /// When the rotated cells collide, the whole piece is pushed once by the
    /// offset from the colliding cell back to the layout center and tested
    /// again. If that placement is also illegal the rotation is dropped.
    pub fn try_rotate(&mut self, grid: &Grid, piece: &mut Piece, clockwise: bool) -> bool {
        let rotated = piece.rotated(clockwise);
        let candidate = match first_blocked(grid, &adjust(&rotated, piece.anchor)) {
            None => rotated,
            Some(idx) => {
                let (cr, cc) = PIECE_LAYOUT.center();
                let dr = cr - rotated[idx].r;
                let dc = cc - rotated[idx].c;
                let kicked: PieceCells = rotated.map(|cell| UserCell {
                    r: cell.r + dr,
                    c: cell.c + dc,
                    ..cell
                });
                if first_blocked(grid, &adjust(&kicked, piece.anchor)).is_some() {
                    return false;
                }
                kicked
            }
        };

        let next = piece.with_cells(candidate);
        if touching_ground(grid, &next) {
            // Resting right after a turn: drop partial progress so the lock
            // does not snap the piece up a fraction of a row.
            self.interp = 0;
        }
        *piece = next;
        true
    }

    /// Debug-only: lift the piece one row
    pub fn try_move_up(&mut self, grid: &Grid, piece: &mut Piece) -> bool {
        if !target_empty(grid, piece, -1, 0) {
            return false;
        }
        *piece = piece.shifted(-1, 0);
        self.interp = 0;
        true
    }

    /// Advance gravity by one step and return the rows the piece moved.
    ///
    /// The accumulator is zeroed whenever the next row is blocked, so progress
    /// never piles up against the floor or a letter.
    pub fn gradual_fall(&mut self, grid: &Grid, piece: &mut Piece) -> i8 {
        self.interp += self.fall_rate;
        if !target_empty(grid, piece, 1, 0) {
            self.interp = 0;
            return 0;
        }

        let mut pending = 0;
        while self.interp >= INTERP_MAX {
            pending += 1;
            self.interp -= INTERP_MAX;
        }

        let mut moved = 0;
        while moved < pending && target_empty(grid, piece, 1, 0) {
            *piece = piece.shifted(1, 0);
            moved += 1;
        }
        if moved < pending {
            self.interp = 0;
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn(grid: &Grid) -> Piece {
        Piece::new(spawn_pos(grid.cols()), ['a', 'b'])
    }

    #[test]
    fn test_target_empty_checks_bounds_and_letters() {
        let mut grid = Grid::new(7, 7);
        let piece = spawn(&grid);
        assert!(target_empty(&grid, &piece, 1, 0));
        assert!(!target_empty(&grid, &piece, -1, 0));
        grid.set_letter(Pos::new(1, 4), Some('z'));
        assert!(!target_empty(&grid, &piece, 1, 0));
    }

    #[test]
    fn test_gradual_fall_moves_one_row_per_interp_max() {
        let grid = Grid::new(7, 7);
        let mut piece = spawn(&grid);
        let mut physics = FallPhysics::new(true, 25, 10);
        assert_eq!(physics.gradual_fall(&grid, &mut piece), 0);
        assert_eq!(physics.gradual_fall(&grid, &mut piece), 0);
        assert_eq!(physics.gradual_fall(&grid, &mut piece), 0);
        assert_eq!(physics.gradual_fall(&grid, &mut piece), 1);
        assert_eq!(piece.anchor.row, 1);
        assert_eq!(physics.interp, 0);
    }

    #[test]
    fn test_gradual_fall_zeroes_interp_when_blocked() {
        let grid = Grid::new(5, 7);
        let mut piece = spawn(&grid).shifted(4, 0);
        let mut physics = FallPhysics::default();
        physics.interp = 60;
        assert_eq!(physics.gradual_fall(&grid, &mut piece), 0);
        assert_eq!(physics.interp, 0);
    }

    #[test]
    fn test_soft_drop_smooth_feeds_accumulator() {
        let grid = Grid::new(7, 7);
        let mut piece = spawn(&grid);
        let mut physics = FallPhysics::new(true, 2, 10);
        assert!(physics.soft_drop(&grid, &mut piece));
        assert_eq!(physics.interp, 20);
        assert_eq!(piece.anchor.row, 0);
    }

    #[test]
    fn test_soft_drop_discrete_moves_a_row() {
        let grid = Grid::new(7, 7);
        let mut piece = spawn(&grid);
        let mut physics = FallPhysics::new(false, 2, 10);
        physics.interp = 40;
        assert!(physics.soft_drop(&grid, &mut piece));
        assert_eq!(piece.anchor.row, 1);
        assert_eq!(physics.interp, 0);
    }

    #[test]
    fn test_horizontal_move_blocked_by_wall() {
        let grid = Grid::new(7, 7);
        let mut piece = spawn(&grid);
        let mut physics = FallPhysics::default();
        assert!(physics.try_move_horizontal(&grid, &mut piece, -1));
        assert!(physics.try_move_horizontal(&grid, &mut piece, -1));
        assert_eq!(piece.left_col(), 0);
        assert!(!physics.try_move_horizontal(&grid, &mut piece, -1));
        assert_eq!(piece.left_col(), 0);
    }

    #[test]
    fn test_horizontal_move_blocked_mid_interpolation_at_floor() {
        let grid = Grid::new(7, 7);
        let mut piece = spawn(&grid).shifted(6, 0);
        let mut physics = FallPhysics::default();
        physics.interp = 30;
        assert!(!physics.try_move_horizontal(&grid, &mut piece, 1));
        physics.smooth = false;
        assert!(physics.try_move_horizontal(&grid, &mut piece, 1));
    }

    #[test]
    fn test_rotate_at_top_kicks_down() {
        let grid = Grid::new(7, 7);
        let mut piece = spawn(&grid);
        let mut physics = FallPhysics::default();
        assert!(physics.try_rotate(&grid, &mut piece, true));
        let [top, bottom] = piece.positions();
        assert_eq!(top, Pos::new(0, 3));
        assert_eq!(bottom, Pos::new(2, 3));
    }

    #[test]
    fn test_rotate_discarded_when_kick_also_collides() {
        let mut grid = Grid::new(7, 7);
        let mut piece = spawn(&grid).shifted(3, 0);
        // Block both the rotated upper cell and the cell the kick would need.
        grid.set_letter(Pos::new(2, 3), Some('x'));
        grid.set_letter(Pos::new(5, 3), Some('y'));
        let before = piece;
        let mut physics = FallPhysics::default();
        assert!(!physics.try_rotate(&grid, &mut piece, true));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_into_rest_resets_interp() {
        let grid = Grid::new(7, 7);
        let mut piece = spawn(&grid).shifted(5, 0);
        let mut physics = FallPhysics::default();
        physics.interp = 50;
        assert!(physics.try_rotate(&grid, &mut piece, true));
        assert!(touching_ground(&grid, &piece));
        assert_eq!(physics.interp, 0);
    }

    #[test]
    fn test_instant_drop_row_uses_least_room() {
        let mut grid = Grid::new(7, 7);
        grid.set_letter(Pos::new(4, 2), Some('q'));
        let piece = spawn(&grid);
        // Column 2 rests at row 3, column 4 at row 6.
        assert_eq!(instant_drop_row(&grid, &piece), 3);
    }

    #[test]
    fn test_spawn_blocked() {
        let mut grid = Grid::new(7, 7);
        assert!(!spawn_blocked(&grid));
        grid.set_letter(Pos::new(0, 4), Some('k'));
        assert!(spawn_blocked(&grid));
    }
}
