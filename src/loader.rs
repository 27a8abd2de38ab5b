//! Async dictionary loading.
//!
//! The round never waits on the file system: the load runs on the tokio
//! runtime and the round polls the returned handle each step.

use std::path::{Path, PathBuf};

use tokio::runtime::Handle;

use crate::core::{Dictionary, DictionaryError, DictionaryHandle};

/// Read and parse a newline-separated word list
pub async fn load_dictionary(path: impl AsRef<Path>) -> Result<Dictionary, DictionaryError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DictionaryError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    let dict = Dictionary::parse(&text)?;
    log::info!("loaded {} words from {}", dict.len(), path.display());
    Ok(dict)
}

/// Start loading `path` in the background and return a pending handle.
///
/// On failure the error is logged and the sender dropped, so the handle
/// never becomes ready.
pub fn spawn_dictionary_load(runtime: &Handle, path: PathBuf) -> DictionaryHandle {
    let (tx, handle) = DictionaryHandle::channel();
    runtime.spawn(async move {
        match load_dictionary(&path).await {
            Ok(dict) => {
                let _ = tx.send(dict);
            }
            Err(err) => log::error!("{err}"),
        }
    });
    handle
}
