//! Gravity module - settling unsupported letters
//!
//! After a lock or a clear, letters with an empty cell below them fall
//! straight down to the ground of their column. One call settles the whole
//! grid in a single bottom-to-top pass.

use crate::grid::Grid;
use crate::types::Pos;

/// One letter relocated by compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fall {
    pub from: Pos,
    pub to: Pos,
    pub letter: char,
}

impl Fall {
    pub fn distance(&self) -> i8 {
        self.to.row - self.from.row
    }
}

/// Drop every floating letter to rest.
///
/// Returns the settled grid and, in scan order, where each moved letter came
/// from and where it landed. The input grid is not modified. Scanning bottom
/// to top means a letter only ever lands in rows already visited, so nothing
/// moves twice in one call and a second call finds nothing to do.
pub fn drop_floating_cells(grid: &Grid) -> (Grid, Vec<Fall>) {
    let mut next = grid.clone();
    let mut falls = Vec::new();

    let last = grid.rows() as i8 - 1;
    for row in (0..last).rev() {
        for col in 0..grid.cols() as i8 {
            let from = Pos::new(row, col);
            let Some(cell) = next.get(from) else {
                continue;
            };
            let Some(letter) = cell.letter else {
                continue;
            };
            if !next.is_empty(from.offset(1, 0)) {
                continue;
            }

            let to = Pos::new(next.ground_height(col, row), col);
            next.clear_cell(from);
            next.set_letter(to, Some(letter));
            next.set_matched(to, cell.recently_matched);
            falls.push(Fall { from, to, letter });
        }
    }

    (next, falls)
}

/// Longest drop among `falls`, in rows
pub fn max_distance(falls: &[Fall]) -> u32 {
    falls
        .iter()
        .map(|f| f.distance().max(0) as u32)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floating_letter_lands_on_floor() {
        let grid = Grid::from_rows(&["a..", "...", "..."]);
        let (next, falls) = drop_floating_cells(&grid);
        assert_eq!(next.to_rows(), vec!["...", "...", "a.."]);
        assert_eq!(
            falls,
            vec![Fall {
                from: Pos::new(0, 0),
                to: Pos::new(2, 0),
                letter: 'a'
            }]
        );
        assert_eq!(max_distance(&falls), 2);
    }

    #[test]
    fn test_stack_keeps_order() {
        let grid = Grid::from_rows(&[".c.", ".a.", "...", "..."]);
        let (next, falls) = drop_floating_cells(&grid);
        assert_eq!(next.to_rows(), vec!["...", "...", ".c.", ".a."]);
        assert_eq!(falls.len(), 2);
        assert_eq!(falls[0].letter, 'a');
        assert_eq!(falls[1].to, Pos::new(2, 1));
    }

    #[test]
    fn test_supported_letters_stay() {
        let grid = Grid::from_rows(&["...", "b..", "a.c"]);
        let (next, falls) = drop_floating_cells(&grid);
        assert_eq!(next, grid);
        assert!(falls.is_empty());
    }

    #[test]
    fn test_compaction_is_idempotent() {
        let grid = Grid::from_rows(&["ab.", "..c", "d..", "...", ".e."]);
        let (once, _) = drop_floating_cells(&grid);
        let (twice, falls) = drop_floating_cells(&once);
        assert_eq!(once, twice);
        assert!(falls.is_empty());
    }

    #[test]
    fn test_input_grid_untouched() {
        let grid = Grid::from_rows(&["x..", "..."]);
        let before = grid.clone();
        let _ = drop_floating_cells(&grid);
        assert_eq!(grid, before);
    }
}
