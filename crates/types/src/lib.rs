//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data, usable from the engine, the terminal view and
//! any collaborator that consumes snapshots.
//!
//! # Grid Dimensions
//!
//! The default playfield is 12 rows by 8 columns. Row 0 is the top.
//! Grid size is a runtime setting; these are only the defaults.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds of simulation time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_STEP_MS` | 16 | Fixed physics step (~60 steps per second) |
//! | `POLL_INTERVAL_MS` | 10 | Nominal interval of the outer poll loop |
//! | `COUNTDOWN_MS` | 3000 | Countdown before the first piece |
//! | `LOCK_DELAY_MS` | 450 | Time a grounded piece waits before locking |
//! | `LEAVE_GROUND_PENALTY_MS` | 100 | Lock time charged each time the piece leaves the ground |
//! | `INSTANT_DROP_ANIM_MS` | 90 | Duration of the instant-drop slide |
//! | `FALL_ANIM_MS_PER_ROW` | 45 | Board letter fall animation, per row fallen |
//! | `MATCH_ANIM_MS` | 600 | Flash duration for matched words |
//!
//! # Fall Interpolation
//!
//! A piece moves down one row each time its interpolation accumulator reaches
//! `INTERP_MAX`. Gravity adds `FALL_RATE` per step; a soft drop adds
//! `FALL_RATE * KEYDOWN_MULTIPLIER`.
//!
//! # Examples
//!
//! ```
//! use word_tetris_types::{GameAction, Pos, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let action = GameAction::from_str("instantDrop").unwrap();
//! assert_eq!(action, GameAction::InstantDrop);
//!
//! let p = Pos::new(3, 4).offset(1, -1);
//! assert_eq!(p, Pos::new(4, 3));
//!
//! assert_eq!(DEFAULT_ROWS, 12);
//! assert_eq!(DEFAULT_COLS, 8);
//! ```

use serde::Serialize;

/// Default grid height in cells
pub const DEFAULT_ROWS: u8 = 12;

/// Default grid width in cells
pub const DEFAULT_COLS: u8 = 8;

/// Smallest grid that still fits a rotated piece
pub const MIN_GRID_SIDE: u8 = 5;

/// Side of the square piece layout template
pub const LAYOUT_SIZE: i8 = 5;

/// Row/column of the layout's geometric center
pub const LAYOUT_CENTER: i8 = LAYOUT_SIZE / 2;

/// Fixed physics step in milliseconds (16ms ≈ 60 steps per second)
pub const FRAME_STEP_MS: u32 = 16;

/// Nominal interval of the outer poll loop
pub const POLL_INTERVAL_MS: u32 = 10;

/// Countdown before the first spawn of a round
pub const COUNTDOWN_MS: u32 = 3000;

/// Accumulator value that equals one full row of fall
pub const INTERP_MAX: u32 = 100;

/// Accumulator gain per step from gravity
pub const FALL_RATE: u32 = 2;

/// Soft drop gain multiplier, applied per soft drop command
pub const KEYDOWN_MULTIPLIER: u32 = 10;

/// Lock delay when the piece is grounded
pub const LOCK_DELAY_MS: u32 = 450;

/// Lock time charged every time a grounded piece leaves the ground
pub const LEAVE_GROUND_PENALTY_MS: u32 = 100;

/// Duration of the instant-drop slide animation
pub const INSTANT_DROP_ANIM_MS: u32 = 90;

/// Board letter fall animation, per row of the longest fall
pub const FALL_ANIM_MS_PER_ROW: u32 = 45;

/// Flash duration for matched words
pub const MATCH_ANIM_MS: u32 = 600;

/// Shortest substring the word matcher will accept
pub const MIN_WORD_LENGTH: usize = 3;

/// Character standing in for an empty cell in matcher strings.
///
/// Dictionaries only hold alphabetic words, so it can never be part of a match.
pub const EMPTY_SENTINEL: char = '-';

/// A board coordinate. Row 0 is the top row, column 0 the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pos {
    pub row: i8,
    pub col: i8,
}

impl Pos {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Shift by `(dr, dc)`
    pub const fn offset(self, dr: i8, dc: i8) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// Discrete, already-decoded player commands
///
/// The engine ignores every command while movement is disabled, except
/// `Restart`, which is only honoured once the round is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Speed up the fall (smooth mode) or drop one row (discrete mode)
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop the piece straight to its resting row
    InstantDrop,
    /// Move piece one row up (debug builds of the config only)
    UpMove,
    /// Start a new round after game over
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use word_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "instantdrop" => Some(GameAction::InstantDrop),
            "upmove" => Some(GameAction::UpMove),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::InstantDrop => "instantDrop",
            GameAction::UpMove => "upMove",
            GameAction::Restart => "restart",
        }
    }

    /// Whether this command acts on the falling piece
    pub fn is_movement(&self) -> bool {
        !matches!(self, GameAction::Restart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_center_is_middle_of_odd_square() {
        assert_eq!(LAYOUT_SIZE % 2, 1);
        assert_eq!(LAYOUT_CENTER, 2);
    }

    #[test]
    fn action_names_round_trip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::InstantDrop,
            GameAction::UpMove,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn sentinel_is_not_alphabetic() {
        assert!(!EMPTY_SENTINEL.is_alphabetic());
    }
}
