//! Snapshot module - read-only round views for renderers and scoring

use serde::Serialize;

use crate::fsm::RoundState;
use crate::types::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CellSnapshot {
    pub letter: Option<char>,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceCellSnapshot {
    pub pos: Pos,
    pub letter: char,
    pub id: u8,
}

/// One letter sliding from `from` to `to` over `duration_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FallAnim {
    pub from: Pos,
    pub to: Pos,
    pub letter: char,
    pub duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AnimSnapshot {
    pub cells: Vec<FallAnim>,
    pub elapsed_ms: u32,
}

impl AnimSnapshot {
    /// Progress of the animation in `[0, 1]`
    pub fn progress(&self) -> f32 {
        let duration = self.cells.iter().map(|c| c.duration_ms).max().unwrap_or(0);
        if duration == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / duration as f32).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RoundSnapshot {
    pub rows: u8,
    pub cols: u8,
    /// Row-major cells
    pub cells: Vec<CellSnapshot>,
    /// Board cells of the falling piece (empty when there is none)
    pub piece: Vec<PieceCellSnapshot>,
    pub piece_visible: bool,
    /// Fraction of a row the piece has fallen past its anchor row
    pub fall_progress: f32,
    pub state: RoundState,
    pub countdown_s: u32,
    pub game_over: bool,
    pub dictionary_ready: bool,
    pub words: Vec<String>,
    pub board_falls: Option<AnimSnapshot>,
    pub instant_drop: Option<AnimSnapshot>,
    pub episode_id: u32,
    pub clock_ms: u64,
}

impl RoundSnapshot {
    pub fn cell(&self, pos: Pos) -> Option<CellSnapshot> {
        if pos.row < 0 || pos.col < 0 || pos.row as u8 >= self.rows || pos.col as u8 >= self.cols {
            return None;
        }
        self.cells
            .get(pos.row as usize * self.cols as usize + pos.col as usize)
            .copied()
    }
}

/// End-of-round record handed to the scoring collaborator
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoundSummary {
    pub episode_id: u32,
    /// Cleared words, in the order they were matched
    pub words: Vec<String>,
    pub longest_word: Option<String>,
    pub letters_cleared: u32,
    /// Match passes beyond the first within one placement
    pub chains: u32,
    pub pieces_placed: u32,
}
