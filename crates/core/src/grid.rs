//! Grid module - the letter playfield
//!
//! A fixed `rows x cols` matrix of cells, row 0 at the top. Each cell holds an
//! optional letter and a "recently matched" flag used by the match flash.
//!
//! Cells live in a flat row-major vector behind an `Arc`, so cloning a grid for
//! a snapshot or a staged compaction is cheap; the first write after a clone
//! copies the storage (`Arc::make_mut`).

use std::sync::Arc;

use crate::types::{Pos, EMPTY_SENTINEL};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub letter: Option<char>,
    pub recently_matched: bool,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.letter.is_none()
    }
}

/// The letter grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: u8,
    cols: u8,
    cells: Arc<Vec<Cell>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: u8, cols: u8) -> Self {
        let len = (rows as usize) * (cols as usize);
        Self {
            rows,
            cols,
            cells: Arc::new(vec![Cell::default(); len]),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some((pos.row as usize) * (self.cols as usize) + (pos.col as usize))
    }

    pub fn in_row_bounds(&self, row: i8) -> bool {
        row >= 0 && (row as i16) < self.rows as i16
    }

    pub fn in_col_bounds(&self, col: i8) -> bool {
        col >= 0 && (col as i16) < self.cols as i16
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.in_row_bounds(pos.row) && self.in_col_bounds(pos.col)
    }

    /// Get the cell at `pos`, or `None` when out of bounds
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn letter(&self, pos: Pos) -> Option<char> {
        self.get(pos).and_then(|cell| cell.letter)
    }

    /// In bounds and holding no letter
    pub fn is_empty(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(cell) if cell.is_empty())
    }

    /// In bounds and holding a letter
    pub fn is_occupied(&self, pos: Pos) -> bool {
        matches!(self.get(pos), Some(cell) if !cell.is_empty())
    }

    /// Set or clear the letter at `pos`
    /// Returns false if out of bounds
    pub fn set_letter(&mut self, pos: Pos, letter: Option<char>) -> bool {
        match self.index(pos) {
            Some(idx) => {
                Arc::make_mut(&mut self.cells)[idx].letter = letter;
                true
            }
            None => false,
        }
    }

    /// Tag or untag a cell as part of a recent match
    /// Returns false if out of bounds
    pub fn set_matched(&mut self, pos: Pos, matched: bool) -> bool {
        match self.index(pos) {
            Some(idx) => {
                Arc::make_mut(&mut self.cells)[idx].recently_matched = matched;
                true
            }
            None => false,
        }
    }

    /// Empty a cell and drop its match tag
    pub fn clear_cell(&mut self, pos: Pos) -> bool {
        match self.index(pos) {
            Some(idx) => {
                Arc::make_mut(&mut self.cells)[idx] = Cell::default();
                true
            }
            None => false,
        }
    }

    /// Row a letter dropped in `col` from at or above `from_row` comes to rest on.
    ///
    /// Scans strictly downward from `from_row`. Returns the row just above the
    /// first occupied cell, or the bottom row when the rest of the column is
    /// empty.
    pub fn ground_height(&self, col: i8, from_row: i8) -> i8 {
        let bottom = self.rows as i8 - 1;
        let start = (from_row + 1).max(0);
        for row in start..=bottom {
            if self.is_occupied(Pos::new(row, col)) {
                return row - 1;
            }
        }
        bottom
    }

    /// Positions of all cells in one row, left to right
    pub fn row_positions(&self, row: i8) -> Vec<Pos> {
        (0..self.cols as i8).map(|col| Pos::new(row, col)).collect()
    }

    /// Positions of all cells in one column, top to bottom
    pub fn col_positions(&self, col: i8) -> Vec<Pos> {
        (0..self.rows as i8).map(|row| Pos::new(row, col)).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Flat row-major view of the cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        for cell in Arc::make_mut(&mut self.cells).iter_mut() {
            *cell = Cell::default();
        }
    }

    /// Build a grid from text rows; `.`, `-` and spaces are empty cells.
    ///
    /// Rows shorter than the widest one are padded with empty cells.
    ///
    /// ```
    /// use word_tetris_core::Grid;
    /// use word_tetris_core::types::Pos;
    ///
    /// let grid = Grid::from_rows(&["....", ".ab."]);
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid.letter(Pos::new(1, 1)), Some('a'));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(rows.len() as u8, width as u8);
        for (row, text) in rows.iter().enumerate() {
            for (col, ch) in text.chars().enumerate() {
                if matches!(ch, '.' | ' ') || ch == EMPTY_SENTINEL {
                    continue;
                }
                grid.set_letter(Pos::new(row as i8, col as i8), Some(ch));
            }
        }
        grid
    }

    /// Render rows as text, `.` for empty cells
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows as i8)
            .map(|row| {
                (0..self.cols as i8)
                    .map(|col| self.letter(Pos::new(row, col)).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(7, 5);
        assert_eq!(grid.index(Pos::new(0, 0)), Some(0));
        assert_eq!(grid.index(Pos::new(0, 4)), Some(4));
        assert_eq!(grid.index(Pos::new(1, 0)), Some(5));
        assert_eq!(grid.index(Pos::new(6, 4)), Some(34));
        assert_eq!(grid.index(Pos::new(-1, 0)), None);
        assert_eq!(grid.index(Pos::new(0, 5)), None);
        assert_eq!(grid.index(Pos::new(7, 0)), None);
    }

    #[test]
    fn test_ground_height_empty_column_is_bottom() {
        for (rows, cols) in [(5u8, 5u8), (7, 7), (12, 8), (20, 10)] {
            let grid = Grid::new(rows, cols);
            let bottom = rows as i8 - 1;
            assert_eq!(grid.ground_height(0, bottom), bottom);
            assert_eq!(grid.ground_height(cols as i8 - 1, 0), bottom);
        }
    }

    #[test]
    fn test_ground_height_stops_above_first_letter() {
        let grid = Grid::from_rows(&["...", "...", ".a.", "...", ".b."]);
        assert_eq!(grid.ground_height(1, 0), 1);
        // Scanning starts strictly below the starting row.
        assert_eq!(grid.ground_height(1, 2), 3);
        assert_eq!(grid.ground_height(1, 3), 3);
        assert_eq!(grid.ground_height(0, 0), 4);
    }

    #[test]
    fn test_clone_is_copy_on_write() {
        let mut a = Grid::new(3, 3);
        a.set_letter(Pos::new(0, 0), Some('x'));
        let b = a.clone();
        a.set_letter(Pos::new(0, 0), Some('y'));
        assert_eq!(b.letter(Pos::new(0, 0)), Some('x'));
        assert_eq!(a.letter(Pos::new(0, 0)), Some('y'));
    }

    #[test]
    fn test_clear_cell_drops_match_flag() {
        let mut grid = Grid::from_rows(&["ab"]);
        grid.set_matched(Pos::new(0, 1), true);
        assert!(grid.get(Pos::new(0, 1)).unwrap().recently_matched);
        grid.clear_cell(Pos::new(0, 1));
        assert_eq!(grid.get(Pos::new(0, 1)), Some(Cell::default()));
    }

    #[test]
    fn test_rows_text_round_trip() {
        let rows = ["c..", "at.", "tea"];
        let grid = Grid::from_rows(&rows);
        assert_eq!(grid.to_rows(), rows.to_vec());
        assert_eq!(grid.occupied_count(), 6);
    }
}
