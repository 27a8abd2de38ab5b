//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders into
//! a plain framebuffer that is flushed to the terminal row by row, which
//! keeps precise control over aspect ratio (2 chars wide per cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use word_tetris_core as core;
pub use word_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{changed_rows, encode_full_into, encode_rows_into, TerminalRenderer};
