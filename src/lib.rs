//! Word tetris (workspace facade crate).
//!
//! Re-exports the member crates under `word_tetris::{core,input,term,types}`
//! and hosts the pieces the binary needs around them: environment config,
//! the file logger and the async dictionary loader.

pub mod config;
pub mod loader;
pub mod logging;

pub use word_tetris_core as core;
pub use word_tetris_input as input;
pub use word_tetris_term as term;
pub use word_tetris_types as types;

pub use config::AppConfig;
