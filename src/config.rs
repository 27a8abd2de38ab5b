//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

use crate::core::EngineConfig;

pub const ENV_DICT: &str = "WORD_TETRIS_DICT";
pub const ENV_SEED: &str = "WORD_TETRIS_SEED";
pub const ENV_ROWS: &str = "WORD_TETRIS_ROWS";
pub const ENV_COLS: &str = "WORD_TETRIS_COLS";
pub const ENV_SMOOTH_FALL: &str = "WORD_TETRIS_SMOOTH_FALL";
pub const ENV_DEBUG: &str = "WORD_TETRIS_DEBUG";
pub const ENV_LOG_PATH: &str = "WORD_TETRIS_LOG_PATH";
pub const ENV_SUMMARY_PATH: &str = "WORD_TETRIS_SUMMARY_PATH";

pub const DEFAULT_DICT_PATH: &str = "words.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dict_path: PathBuf,
    pub engine: EngineConfig,
    pub log_path: Option<PathBuf>,
    /// Where the JSON round summary goes on exit; stdout when unset
    pub summary_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dict_path: PathBuf::from(DEFAULT_DICT_PATH),
            engine: EngineConfig::default(),
            log_path: None,
            summary_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = EngineConfig::default();
        let value = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let dict_path = value(ENV_DICT)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_PATH));
        let seed = value(ENV_SEED)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(time_seed);
        let rows = value(ENV_ROWS)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.rows);
        let cols = value(ENV_COLS)
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.cols);
        let smooth_fall = value(ENV_SMOOTH_FALL)
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.smooth_fall);
        let debug_moves = value(ENV_DEBUG)
            .and_then(|s| parse_flag(&s))
            .unwrap_or(false);

        let engine = EngineConfig {
            rows,
            cols,
            seed,
            smooth_fall,
            debug_moves,
            ..defaults
        }
        .normalized();

        Self {
            dict_path,
            engine,
            log_path: value(ENV_LOG_PATH).map(PathBuf::from),
            summary_path: value(ENV_SUMMARY_PATH).map(PathBuf::from),
        }
    }

    /// Transitions are only logged in debug mode
    pub fn log_level(&self) -> LevelFilter {
        if self.engine.debug_moves {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
