//! Core simulation for word tetris - deterministic and free of I/O
//!
//! Two-letter pieces fall into a letter grid. Once a piece locks, loose
//! letters settle, and any dictionary word read along an affected row or
//! column is cleared. Clears can leave letters floating, which settle and
//! may spell further words (a chain).
//!
//! # Module Structure
//!
//! - [`grid`]: copy-on-write letter grid and ground-height queries
//! - [`piece`]: the two-letter layout, rotation and spawning
//! - [`movement`]: collision predicates and fall physics
//! - [`gravity`]: compaction of floating letters
//! - [`dictionary`]: word set and its one-shot readiness handle
//! - [`matcher`]: longest-word search along rows and columns
//! - [`fsm`]: round states and the transition table
//! - [`round`]: the per-step state machine tying it all together
//! - [`driver`]: fixed-step accumulator with an input mailbox
//! - [`snapshot`]: read-only views for renderers and the round summary
//! - [`rng`]: deterministic frequency-weighted letters
//!
//! # Example
//!
//! ```
//! use word_tetris_core::{Dictionary, DictionaryHandle, EngineConfig, Round, RoundState};
//!
//! let dict = Dictionary::from_words(["cat", "dog"]);
//! let mut round = Round::new(EngineConfig::default(), DictionaryHandle::ready(dict));
//!
//! round.step();
//! assert_eq!(round.state(), RoundState::Countdown);
//! ```
//!
//! # Timing
//!
//! - **Step**: 16ms of simulation time per [`Round::step`]
//! - **Countdown**: 3s before the first piece
//! - **Lock Delay**: 450ms once grounded, less 100ms each time the piece
//!   leaves the ground
//! - **Animations**: 90ms instant drop, 45ms per row of settling, 600ms match

pub mod dictionary;
pub mod driver;
pub mod fsm;
pub mod gravity;
pub mod grid;
pub mod matcher;
pub mod movement;
pub mod piece;
pub mod rng;
pub mod round;
pub mod snapshot;

pub use word_tetris_types as types;

pub use dictionary::{Dictionary, DictionaryError, DictionaryHandle};
pub use driver::FixedStepDriver;
pub use fsm::{RoundEvent, RoundState};
pub use gravity::{drop_floating_cells, Fall};
pub use grid::{Cell, Grid};
pub use matcher::{find_longest_word, find_matches, Line, Span, WordMatch};
pub use piece::Piece;
pub use rng::{LetterSource, SimpleRng};
pub use round::{EngineConfig, Round};
pub use snapshot::{AnimSnapshot, FallAnim, RoundSnapshot, RoundSummary};
