//! Async dictionary loading against real files

use std::path::PathBuf;
use std::time::Duration;

use word_tetris::core::{DictionaryError, Round, RoundState, EngineConfig};
use word_tetris::loader::{load_dictionary, spawn_dictionary_load};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("word-tetris-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_parses_word_list() {
    let path = temp_file("words.txt", "# animals\nCat\n\ndog\n  emu  \nit's\n");
    let dict = tokio_test::block_on(load_dictionary(&path)).unwrap();
    assert_eq!(dict.len(), 3);
    assert!(dict.contains("cat"));
    assert!(dict.contains("EMU"));
    assert!(!dict.contains("it's"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_missing_file_is_unreadable() {
    let path = std::env::temp_dir().join("word-tetris-does-not-exist.txt");
    let err = tokio_test::block_on(load_dictionary(&path)).unwrap_err();
    assert_eq!(err.code(), "dictionary_unreadable");
    assert!(err.message().contains("word-tetris-does-not-exist.txt"));
}

#[test]
fn test_comment_only_file_is_empty() {
    let path = temp_file("empty.txt", "# nothing here\n\n");
    let err = tokio_test::block_on(load_dictionary(&path)).unwrap_err();
    assert_eq!(err, DictionaryError::Empty);
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_round_spawns_once_background_load_finishes() {
    let path = temp_file("bg.txt", "cat\ndog\n");
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let handle = spawn_dictionary_load(runtime.handle(), path.clone());
    let mut round = Round::new(EngineConfig::default(), handle);

    for _ in 0..1000 {
        round.step();
        if round.state() == RoundState::SpawningBlock {
            break;
        }
    }
    for _ in 0..500 {
        if round.state() == RoundState::PlacingBlock {
            break;
        }
        std::thread::sleep(Duration::from_millis(2));
        round.step();
    }
    assert_eq!(round.state(), RoundState::PlacingBlock);
    assert!(round.dictionary_ready());
    let _ = std::fs::remove_file(path);
}

#[test]
fn test_failed_background_load_keeps_round_waiting() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let handle = spawn_dictionary_load(
        runtime.handle(),
        std::env::temp_dir().join("word-tetris-missing-list.txt"),
    );
    let mut round = Round::new(EngineConfig::default(), handle);
    for _ in 0..400 {
        round.step();
        std::thread::sleep(Duration::from_micros(200));
    }
    assert_eq!(round.state(), RoundState::SpawningBlock);
    assert!(!round.dictionary_ready());
}
