//! Word search over rows and columns

use word_tetris::core::matcher::affected_lines;
use word_tetris::core::{find_longest_word, find_matches, Dictionary, Grid, Line, Span};
use word_tetris::types::Pos;

fn line(s: &str) -> Vec<Option<char>> {
    s.chars()
        .map(|c| if c == '-' { None } else { Some(c) })
        .collect()
}

#[test]
fn test_longest_word_in_line() {
    let dict = Dictionary::from_words(["cat", "cats", "scat"]);
    let span = find_longest_word(&line("xscatsx"), &dict, 3).unwrap();
    // "scat" (1..=4) and "cats" (2..=5) tie; the leftmost wins.
    assert_eq!(span, Span { left: 1, right: 4 });
    assert_eq!(span.len(), 4);
}

#[test]
fn test_empty_cells_split_words() {
    let grid = Grid::from_rows(&["cat--dog"]);
    let dict = Dictionary::from_words(["cat", "dog", "catdog"]);
    let found = find_matches(&grid, &[Line::Row(0)], &dict, 3);
    let spans: Vec<(Pos, Pos)> = found
        .iter()
        .map(|m| (m.cells[0], *m.cells.last().unwrap()))
        .collect();
    assert_eq!(
        spans,
        vec![
            (Pos::new(0, 0), Pos::new(0, 2)),
            (Pos::new(0, 5), Pos::new(0, 7)),
        ]
    );
}

#[test]
fn test_dictionary_is_case_insensitive() {
    let grid = Grid::from_rows(&["DOG"]);
    let dict = Dictionary::from_words(["Dog"]);
    let found = find_matches(&grid, &[Line::Row(0)], &dict, 3);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].word, "dog");
}

#[test]
fn test_row_and_column_share_a_letter() {
    let grid = Grid::from_rows(&[
        "..b", //
        "..a",
        "cat",
    ]);
    let dict = Dictionary::from_words(["cat", "bat"]);
    let lines = affected_lines([Pos::new(2, 2)]);
    let found = find_matches(&grid, &lines, &dict, 3);
    let words: Vec<&str> = found.iter().map(|m| m.word.as_str()).collect();
    assert_eq!(words, vec!["cat", "bat"]);
}

#[test]
fn test_only_affected_lines_are_searched() {
    let grid = Grid::from_rows(&["cat", "...", "dog"]);
    let dict = Dictionary::from_words(["cat", "dog"]);
    let found = find_matches(&grid, &[Line::Row(2)], &dict, 3);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].word, "dog");
}

#[test]
fn test_min_length_is_respected() {
    let grid = Grid::from_rows(&["go..."]);
    let dict = Dictionary::from_words(["go"]);
    assert!(find_matches(&grid, &[Line::Row(0)], &dict, 3).is_empty());
    assert_eq!(find_matches(&grid, &[Line::Row(0)], &dict, 2).len(), 1);
}
