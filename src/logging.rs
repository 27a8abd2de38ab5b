//! File-backed `log` sink.
//!
//! The terminal owns stdout while a round is on screen, so log records are
//! handed to a background task that appends them to a file.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::{LevelFilter, Log, Metadata, Record};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

pub struct FileLogger {
    tx: mpsc::UnboundedSender<String>,
    level: LevelFilter,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.tx.send(format_record(record));
        }
    }

    fn flush(&self) {}
}

/// `[LEVEL target] message` plus a trailing newline
pub fn format_record(record: &Record) -> String {
    format!("[{} {}] {}\n", record.level(), record.target(), record.args())
}

/// Install the global logger, appending to `path` from a task on `runtime`.
pub fn init_file_logger(runtime: &Handle, path: PathBuf, level: LevelFilter) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    runtime.spawn(async move {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(_) => return,
        };
        while let Some(line) = rx.recv().await {
            if file.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
    });

    let logger: &'static FileLogger = Box::leak(Box::new(FileLogger { tx, level }));
    log::set_logger(logger).map_err(|e| anyhow!("logger already installed: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_format_record() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("matched {:?}", "cat"))
                .level(Level::Info)
                .target("word_tetris_core::round")
                .build(),
        );
        assert_eq!(line, "[INFO word_tetris_core::round] matched \"cat\"\n");
    }

    #[test]
    fn test_level_filter() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let logger = FileLogger {
            tx,
            level: LevelFilter::Info,
        };
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }
}
