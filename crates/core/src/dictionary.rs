//! Dictionary module - the word list and its readiness signal
//!
//! The engine only needs O(1) membership tests and a boolean "loaded" flag.
//! Loading itself happens elsewhere; [`DictionaryHandle`] wraps a one-shot
//! channel the spawning state polls without blocking.

use std::collections::HashSet;
use std::fmt;

use tokio::sync::oneshot::{self, error::TryRecvError};

/// Set of valid words, stored lowercase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
    max_len: usize,
}

impl Dictionary {
    /// Build from any word iterator.
    ///
    /// Words are trimmed and lowercased; entries with non-alphabetic
    /// characters are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        for word in words {
            dict.insert(word.as_ref());
        }
        dict
    }

    /// Parse a newline-separated word list; blank lines and `#` comments are ignored
    pub fn parse(text: &str) -> Result<Self, DictionaryError> {
        let dict = Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        if dict.is_empty() {
            return Err(DictionaryError::Empty);
        }
        Ok(dict)
    }

    /// Add a word; returns false if it was rejected or already present
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() || !word.chars().all(char::is_alphabetic) {
            return false;
        }
        let word = word.to_lowercase();
        self.max_len = self.max_len.max(word.chars().count());
        self.words.insert(word)
    }

    /// Case-insensitive membership test
    pub fn contains(&self, word: &str) -> bool {
        if word.chars().all(|c| !c.is_uppercase()) {
            return self.words.contains(word);
        }
        self.words.contains(&word.to_lowercase())
    }

    /// Length of the longest word, in characters
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Failure to produce a dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    Unreadable { path: String, reason: String },
    Empty,
}

impl DictionaryError {
    pub fn code(&self) -> &'static str {
        match self {
            DictionaryError::Unreadable { .. } => "dictionary_unreadable",
            DictionaryError::Empty => "dictionary_empty",
        }
    }

    pub fn message(&self) -> String {
        match self {
            DictionaryError::Unreadable { path, reason } => {
                format!("could not read word list {path}: {reason}")
            }
            DictionaryError::Empty => "word list has no usable words".to_string(),
        }
    }
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for DictionaryError {}

/// One-shot readiness handle for the dictionary
#[derive(Debug)]
pub struct DictionaryHandle {
    ready: Option<Dictionary>,
    pending: Option<oneshot::Receiver<Dictionary>>,
}

impl DictionaryHandle {
    /// Handle that is ready immediately
    pub fn ready(dict: Dictionary) -> Self {
        Self {
            ready: Some(dict),
            pending: None,
        }
    }

    /// Handle that becomes ready when `rx` delivers
    pub fn pending(rx: oneshot::Receiver<Dictionary>) -> Self {
        Self {
            ready: None,
            pending: Some(rx),
        }
    }

    /// Create a pending handle together with the sender that fulfils it
    pub fn channel() -> (oneshot::Sender<Dictionary>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self::pending(rx))
    }

    /// Non-blocking readiness check; caches the dictionary once it arrives.
    ///
    /// A sender dropped without a value leaves the handle not-ready for good.
    pub fn poll(&mut self) -> Option<&Dictionary> {
        if self.ready.is_none() {
            if let Some(rx) = self.pending.as_mut() {
                match rx.try_recv() {
                    Ok(dict) => {
                        log::info!("dictionary ready ({} words)", dict.len());
                        self.ready = Some(dict);
                        self.pending = None;
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Closed) => {
                        log::warn!("dictionary loader finished without a word list");
                        self.pending = None;
                    }
                }
            }
        }
        self.ready.as_ref()
    }

    /// The dictionary, if it has already been received
    pub fn get(&self) -> Option<&Dictionary> {
        self.ready.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_normalised() {
        let dict = Dictionary::from_words(["Cat", " dog ", "it's", "", "ZEBRA"]);
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("cat"));
        assert!(dict.contains("DOG"));
        assert!(dict.contains("zebra"));
        assert!(!dict.contains("it's"));
        assert_eq!(dict.max_len(), 5);
    }

    #[test]
    fn test_parse_skips_comments() {
        let dict = Dictionary::parse("# words\ncat\n\nbats\n").unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(Dictionary::parse("# nothing\n"), Err(DictionaryError::Empty));
    }

    #[test]
    fn test_sentinel_never_matches() {
        let dict = Dictionary::from_words(["a-b", "ab"]);
        assert!(!dict.contains("a-b"));
    }

    #[test]
    fn test_handle_polls_without_blocking() {
        let (tx, mut handle) = DictionaryHandle::channel();
        assert!(handle.poll().is_none());
        assert!(handle.poll().is_none());
        tx.send(Dictionary::from_words(["cat"])).unwrap();
        assert!(handle.poll().is_some_and(|d| d.contains("cat")));
        // Cached after the first successful poll.
        assert!(handle.is_ready());
        assert!(handle.get().is_some());
    }

    #[test]
    fn test_dropped_sender_stays_not_ready() {
        let (tx, mut handle) = DictionaryHandle::channel();
        drop(tx);
        assert!(handle.poll().is_none());
        assert!(handle.poll().is_none());
    }

    #[test]
    fn test_error_codes() {
        let err = DictionaryError::Unreadable {
            path: "words.txt".to_string(),
            reason: "missing".to_string(),
        };
        assert_eq!(err.code(), "dictionary_unreadable");
        assert!(err.to_string().contains("words.txt"));
    }
}
