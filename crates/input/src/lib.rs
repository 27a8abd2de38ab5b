//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Held keys
//! rely on the terminal's own auto-repeat; the engine treats every repeat as
//! a fresh action.

pub mod map;

pub use word_tetris_types as types;

pub use map::{handle_key_event, should_quit};
