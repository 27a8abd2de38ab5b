use criterion::{black_box, criterion_group, criterion_main, Criterion};
use word_tetris::core::matcher::affected_lines;
use word_tetris::core::{
    drop_floating_cells, find_matches, Dictionary, DictionaryHandle, EngineConfig, Grid, Round,
    RoundState,
};
use word_tetris::types::{GameAction, Pos};

fn dictionary() -> Dictionary {
    Dictionary::from_words([
        "cat", "cats", "dog", "dogs", "tea", "eat", "ate", "rat", "tar", "art", "star", "rats",
        "east", "seat", "teas", "stare", "tears", "rates",
    ])
}

fn bench_step(c: &mut Criterion) {
    let mut round = Round::new(
        EngineConfig::default(),
        DictionaryHandle::ready(dictionary()),
    );

    c.bench_function("round_step_16ms", |b| {
        b.iter(|| {
            if round.state() == RoundState::GameOver {
                round.apply_action(GameAction::Restart);
            }
            if round.state() == RoundState::PlacingBlock {
                round.apply_action(GameAction::InstantDrop);
            }
            round.step();
            black_box(round.state());
        })
    });
}

fn bench_compaction(c: &mut Criterion) {
    let grid = Grid::from_rows(&[
        "s.t.a.r.", //
        "........",
        ".e.a.t..",
        "........",
        "r.a.t.s.",
        "........",
        "........",
        ".t.e.a.s",
        "........",
        "........",
        "........",
        "........",
    ]);

    c.bench_function("drop_floating_cells_12x8", |b| {
        b.iter(|| black_box(drop_floating_cells(black_box(&grid))))
    });
}

fn bench_matcher(c: &mut Criterion) {
    let dict = dictionary();
    let grid = Grid::from_rows(&[
        "........", //
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "s.......",
        "t.......",
        "a.......",
        "rates.do",
        "stareats",
    ]);
    let lines = affected_lines((0..8).map(|col| Pos::new(11, col)));

    c.bench_function("find_matches_bottom_row", |b| {
        b.iter(|| black_box(find_matches(black_box(&grid), &lines, &dict, 3)))
    });
}

criterion_group!(benches, bench_step, bench_compaction, bench_matcher);
criterion_main!(benches);
