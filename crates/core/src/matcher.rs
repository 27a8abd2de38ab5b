//! Matcher module - longest-word search over rows and columns
//!
//! Rows read left to right. Columns read top to bottom and bottom to top; the
//! reversed reading only wins when it is strictly longer. Empty cells become
//! [`EMPTY_SENTINEL`], which no dictionary word contains.

use std::collections::BTreeSet;

use crate::dictionary::Dictionary;
use crate::grid::Grid;
use crate::types::{Pos, EMPTY_SENTINEL};

/// Inclusive index range within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub left: usize,
    pub right: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }
}

/// A full row or column of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    Row(i8),
    Col(i8),
}

impl Line {
    /// Cell positions in natural reading order
    pub fn positions(&self, grid: &Grid) -> Vec<Pos> {
        match *self {
            Line::Row(row) => grid.row_positions(row),
            Line::Col(col) => grid.col_positions(col),
        }
    }
}

/// A word found on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    pub line: Line,
    /// The word as read, lowercase
    pub word: String,
    /// Matched cells in reading order
    pub cells: Vec<Pos>,
    /// Read bottom to top
    pub reversed: bool,
}

/// Longest dictionary word in `line`.
///
/// Scans every `left <= right` pair with ascending `left`, then ascending
/// `right`, keeping only strictly longer hits, so the leftmost wins a tie.
pub fn find_longest_word(line: &[Option<char>], dict: &Dictionary, min_len: usize) -> Option<Span> {
    let text: Vec<char> = line.iter().map(|c| c.unwrap_or(EMPTY_SENTINEL)).collect();
    let min_len = min_len.max(1);
    let max_len = dict.max_len();
    let mut best: Option<Span> = None;
    let mut buf = String::with_capacity(max_len);

    for left in 0..text.len() {
        if text[left] == EMPTY_SENTINEL {
            continue;
        }
        buf.clear();
        for right in left..text.len() {
            let len = right - left + 1;
            // A longer substring would contain the sentinel or exceed every word.
            if text[right] == EMPTY_SENTINEL || len > max_len {
                break;
            }
            buf.push(text[right]);
            if len < min_len || best.is_some_and(|b| b.len() >= len) {
                continue;
            }
            if dict.contains(&buf) {
                best = Some(Span { left, right });
            }
        }
    }
    best
}

/// Every word in one line, longest first.
///
/// After each hit its cells are blanked and the line is searched again, so
/// separate words in the same line are all reported.
pub fn find_line_matches(grid: &Grid, line: Line, dict: &Dictionary, min_len: usize) -> Vec<WordMatch> {
    let positions = line.positions(grid);
    let mut letters: Vec<Option<char>> = positions.iter().map(|&p| grid.letter(p)).collect();
    let n = letters.len();
    let mut found = Vec::new();

    loop {
        let mut best = find_longest_word(&letters, dict, min_len).map(|span| (span, false));

        if let Line::Col(_) = line {
            let reversed: Vec<Option<char>> = letters.iter().rev().copied().collect();
            if let Some(span) = find_longest_word(&reversed, dict, min_len) {
                if best.map_or(true, |(b, _)| span.len() > b.len()) {
                    let natural = Span {
                        left: n - 1 - span.right,
                        right: n - 1 - span.left,
                    };
                    best = Some((natural, true));
                }
            }
        }

        let Some((span, reversed)) = best else {
            break;
        };

        let mut cells: Vec<Pos> = positions[span.left..=span.right].to_vec();
        if reversed {
            cells.reverse();
        }
        let word: String = cells.iter().filter_map(|&p| grid.letter(p)).collect();
        for slot in &mut letters[span.left..=span.right] {
            *slot = None;
        }
        found.push(WordMatch {
            line,
            word: word.to_lowercase(),
            cells,
            reversed,
        });
    }

    found
}

/// Rows and columns touched by `positions`, deduplicated, rows first
pub fn affected_lines<I>(positions: I) -> Vec<Line>
where
    I: IntoIterator<Item = Pos>,
{
    let mut lines = BTreeSet::new();
    for p in positions {
        lines.insert(Line::Row(p.row));
        lines.insert(Line::Col(p.col));
    }
    lines.into_iter().collect()
}

/// Search every line in `lines` against the same grid state
pub fn find_matches(grid: &Grid, lines: &[Line], dict: &Dictionary, min_len: usize) -> Vec<WordMatch> {
    lines
        .iter()
        .flat_map(|&line| find_line_matches(grid, line, dict, min_len))
        .collect()
}
