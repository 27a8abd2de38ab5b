//! Round module - the simulation context driven one fixed step at a time
//!
//! A [`Round`] owns the grid, the falling piece, every timer and the
//! dictionary handle. [`Round::step`] advances the clock by
//! [`FRAME_STEP_MS`] and runs exactly one handler for the current
//! [`RoundState`]; player input arrives through [`Round::apply_action`]
//! between steps.

use std::collections::BTreeSet;

use crate::dictionary::DictionaryHandle;
use crate::fsm::{RoundEvent, RoundState};
use crate::gravity::{drop_floating_cells, max_distance, Fall};
use crate::grid::Grid;
use crate::matcher::{affected_lines, find_matches};
use crate::movement::{instant_drop_row, spawn_blocked, touching_ground, FallPhysics};
use crate::piece::Piece;
use crate::rng::LetterSource;
use crate::snapshot::{
    AnimSnapshot, CellSnapshot, FallAnim, PieceCellSnapshot, RoundSnapshot, RoundSummary,
};
use crate::types::*;

/// Tunables for one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub rows: u8,
    pub cols: u8,
    pub seed: u32,
    pub smooth_fall: bool,
    pub fall_rate: u32,
    pub keydown_multiplier: u32,
    pub min_word_length: usize,
    /// Enables [`GameAction::UpMove`]
    pub debug_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: 1,
            smooth_fall: true,
            fall_rate: FALL_RATE,
            keydown_multiplier: KEYDOWN_MULTIPLIER,
            min_word_length: MIN_WORD_LENGTH,
            debug_moves: false,
        }
    }
}

impl EngineConfig {
    /// Clamp values the engine cannot run with
    pub fn normalized(self) -> Self {
        let max_side = i8::MAX as u8;
        Self {
            rows: self.rows.clamp(MIN_GRID_SIDE, max_side),
            cols: self.cols.clamp(MIN_GRID_SIDE, max_side),
            fall_rate: self.fall_rate.max(1),
            min_word_length: self.min_word_length.max(1),
            ..self
        }
    }
}

#[derive(Debug, Clone)]
struct StagedFall {
    grid: Grid,
    falls: Vec<Fall>,
    duration_ms: u32,
}

#[derive(Debug, Clone, Copy)]
struct InstantDrop {
    from: Piece,
    target_row: i8,
}

/// Clock readings (ms) at which the timed phases began
#[derive(Debug, Clone, Copy, Default)]
struct Timers {
    countdown_start: u64,
    lock_start: u64,
    lock_penalty_ms: u32,
    drop_anim_start: u64,
    fall_anim_start: u64,
    match_anim_start: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct RoundStats {
    pieces_placed: u32,
    letters_cleared: u32,
    chains: u32,
    /// Match passes since the last lock
    passes: u32,
}

/// Complete round state
#[derive(Debug)]
pub struct Round {
    config: EngineConfig,
    state: RoundState,
    grid: Grid,
    piece: Option<Piece>,
    piece_visible: bool,
    movement_enabled: bool,
    physics: FallPhysics,
    letters: LetterSource,
    dictionary: DictionaryHandle,
    /// Simulation time, advanced only by [`Round::step`]
    clock_ms: u64,
    timers: Timers,
    countdown_s: u32,
    instant_drop_requested: bool,
    instant_drop: Option<InstantDrop>,
    /// Cells written since the last match pass; they seed the next search
    placed: BTreeSet<Pos>,
    matched: BTreeSet<Pos>,
    words: Vec<String>,
    staged: Option<StagedFall>,
    game_over: bool,
    stats: RoundStats,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
}

impl Round {
    pub fn new(config: EngineConfig, dictionary: DictionaryHandle) -> Self {
        let config = config.normalized();
        Self {
            config,
            state: RoundState::StartingGame,
            grid: Grid::new(config.rows, config.cols),
            piece: None,
            piece_visible: false,
            movement_enabled: false,
            physics: FallPhysics::new(
                config.smooth_fall,
                config.fall_rate,
                config.keydown_multiplier,
            ),
            letters: LetterSource::new(config.seed),
            dictionary,
            clock_ms: 0,
            timers: Timers::default(),
            countdown_s: 0,
            instant_drop_requested: false,
            instant_drop: None,
            placed: BTreeSet::new(),
            matched: BTreeSet::new(),
            words: Vec::new(),
            staged: None,
            game_over: false,
            stats: RoundStats::default(),
            episode_id: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scenario setup and tooling
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// Replace the falling piece's placement or letters in place
    pub fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    pub fn piece_visible(&self) -> bool {
        self.piece_visible && self.piece.is_some()
    }

    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    pub fn physics(&self) -> &FallPhysics {
        &self.physics
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    /// Whole seconds left on the countdown, rounded up
    pub fn countdown_s(&self) -> u32 {
        self.countdown_s
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Words cleared this round, in match order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn matched(&self) -> &BTreeSet<Pos> {
        &self.matched
    }

    pub fn dictionary_ready(&self) -> bool {
        self.dictionary.is_ready()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Advance the clock one fixed step and run the current state's handler
    pub fn step(&mut self) {
        self.clock_ms += u64::from(FRAME_STEP_MS);
        match self.state {
            RoundState::StartingGame => self.start_round(),
            RoundState::Countdown => self.run_countdown(),
            RoundState::SpawningBlock => self.spawn_piece(),
            RoundState::PlacingBlock => self.place_piece(),
            RoundState::PlayerInstantDropAnim => self.run_instant_drop_anim(),
            RoundState::LockDelay => self.run_lock_delay(),
            RoundState::FallingLetters => self.settle_letters(),
            RoundState::FallingLettersAnim => self.run_fall_anim(),
            RoundState::CheckingMatches => self.check_matches(),
            RoundState::PlayMatchAnimation => self.run_match_anim(),
            RoundState::PostMatchAnimation => self.finish_matches(),
            RoundState::GameOver => {}
        }
    }

    /// Apply a player action; returns whether anything changed.
    ///
    /// Everything but [`GameAction::Restart`] is ignored while movement is
    /// disabled. Restart is only honoured once the round is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if !action.is_movement() {
            if self.state != RoundState::GameOver {
                return false;
            }
            self.episode_id = self.episode_id.wrapping_add(1);
            self.fire(RoundEvent::Restart);
            return true;
        }

        if !self.movement_enabled {
            return false;
        }
        let Some(mut piece) = self.piece else {
            return false;
        };

        let changed = match action {
            GameAction::MoveLeft => self.physics.try_move_horizontal(&self.grid, &mut piece, -1),
            GameAction::MoveRight => self.physics.try_move_horizontal(&self.grid, &mut piece, 1),
            GameAction::SoftDrop => self.physics.soft_drop(&self.grid, &mut piece),
            GameAction::RotateCw => self.physics.try_rotate(&self.grid, &mut piece, true),
            GameAction::RotateCcw => self.physics.try_rotate(&self.grid, &mut piece, false),
            GameAction::InstantDrop => {
                self.instant_drop_requested = true;
                true
            }
            GameAction::UpMove => {
                self.config.debug_moves && self.physics.try_move_up(&self.grid, &mut piece)
            }
            GameAction::Restart => false,
        };
        self.piece = Some(piece);
        changed
    }

    fn fire(&mut self, event: RoundEvent) {
        let next = self.state.next(event);
        log::debug!(
            "{} --{}--> {}",
            self.state.as_str(),
            event.as_str(),
            next.as_str()
        );
        self.state = next;
    }

    fn start_round(&mut self) {
        self.grid = Grid::new(self.config.rows, self.config.cols);
        self.piece = None;
        self.piece_visible = false;
        self.movement_enabled = false;
        self.physics.reset();
        self.timers = Timers {
            countdown_start: self.clock_ms,
            ..Timers::default()
        };
        self.countdown_s = COUNTDOWN_MS.div_ceil(1000);
        self.instant_drop_requested = false;
        self.instant_drop = None;
        self.placed.clear();
        self.matched.clear();
        self.words.clear();
        self.staged = None;
        self.game_over = false;
        self.stats = RoundStats::default();
        log::info!(
            "round {} starting on a {}x{} grid",
            self.episode_id,
            self.config.rows,
            self.config.cols
        );
        self.fire(RoundEvent::Start);
    }

    fn run_countdown(&mut self) {
        let elapsed = self.clock_ms - self.timers.countdown_start;
        let total = u64::from(COUNTDOWN_MS);
        if elapsed >= total {
            self.countdown_s = 0;
            self.fire(RoundEvent::Done);
        } else {
            self.countdown_s = (total - elapsed).div_ceil(1000) as u32;
        }
    }

    fn spawn_piece(&mut self) {
        if self.dictionary.poll().is_none() {
            return;
        }

        let piece = Piece::spawn(self.config.cols, &mut self.letters);
        log::info!(
            "spawned {}{} at {:?}",
            piece.cells[0].letter,
            piece.cells[1].letter,
            piece.anchor
        );
        self.piece = Some(piece);
        self.piece_visible = true;
        self.movement_enabled = true;
        self.timers.lock_penalty_ms = 0;
        self.matched.clear();
        self.instant_drop_requested = false;
        self.stats.passes = 0;
        self.physics.reset();
        self.fire(RoundEvent::Spawn);
    }

    fn place_piece(&mut self) {
        let Some(mut piece) = self.piece else {
            unreachable!("placing without a piece");
        };

        if spawn_blocked(&self.grid) {
            self.game_over = true;
            self.movement_enabled = false;
            log::info!(
                "game over after {} pieces, {} words",
                self.stats.pieces_placed,
                self.words.len()
            );
            self.fire(RoundEvent::Blocked);
            return;
        }

        self.physics.gradual_fall(&self.grid, &mut piece);
        self.piece = Some(piece);

        if touching_ground(&self.grid, &piece) {
            self.timers.lock_start = self.clock_ms;
            self.fire(RoundEvent::TouchingBlock);
        } else if self.instant_drop_requested {
            self.instant_drop = Some(InstantDrop {
                from: piece,
                target_row: instant_drop_row(&self.grid, &piece),
            });
            self.piece_visible = false;
            self.movement_enabled = false;
            self.physics.reset();
            self.timers.drop_anim_start = self.clock_ms;
            self.fire(RoundEvent::DoInstantDropAnim);
        }
    }

    fn run_instant_drop_anim(&mut self) {
        if self.clock_ms - self.timers.drop_anim_start < u64::from(INSTANT_DROP_ANIM_MS) {
            return;
        }
        let Some(drop) = self.instant_drop.take() else {
            unreachable!("instant drop animation without a target");
        };

        let mut piece = drop.from;
        piece.anchor.row = drop.target_row;
        self.piece = Some(piece);
        self.piece_visible = true;
        self.timers.lock_start = self.clock_ms;
        self.fire(RoundEvent::TouchingBlock);
    }

    fn run_lock_delay(&mut self) {
        let Some(piece) = self.piece else {
            unreachable!("lock delay without a piece");
        };

        if !touching_ground(&self.grid, &piece) {
            self.timers.lock_penalty_ms += LEAVE_GROUND_PENALTY_MS;
            self.fire(RoundEvent::Unlock);
            return;
        }

        let elapsed =
            self.clock_ms - self.timers.lock_start + u64::from(self.timers.lock_penalty_ms);
        if elapsed >= u64::from(LOCK_DELAY_MS) || self.instant_drop_requested {
            self.lock_piece(piece);
        }
    }

    fn lock_piece(&mut self, piece: Piece) {
        for cell in piece.adjusted() {
            let pos = cell.pos();
            self.grid.set_letter(pos, Some(cell.letter));
            self.placed.insert(pos);
        }
        self.piece = None;
        self.piece_visible = false;
        self.movement_enabled = false;
        self.instant_drop_requested = false;
        self.physics.reset();
        self.stats.pieces_placed += 1;
        self.fire(RoundEvent::Lock);
    }

    fn settle_letters(&mut self) {
        let (grid, falls) = drop_floating_cells(&self.grid);
        let duration_ms = max_distance(&falls) * FALL_ANIM_MS_PER_ROW;
        if !falls.is_empty() {
            log::debug!("{} letters falling over {}ms", falls.len(), duration_ms);
        }
        self.staged = Some(StagedFall {
            grid,
            falls,
            duration_ms,
        });
        self.timers.fall_anim_start = self.clock_ms;
        self.fire(RoundEvent::DoAnim);
    }

    fn run_fall_anim(&mut self) {
        let Some(staged) = self.staged.as_ref() else {
            unreachable!("fall animation without staged letters");
        };
        if self.clock_ms - self.timers.fall_anim_start < u64::from(staged.duration_ms) {
            return;
        }

        if let Some(staged) = self.staged.take() {
            self.grid = staged.grid;
            for fall in &staged.falls {
                self.placed.remove(&fall.from);
                self.placed.insert(fall.to);
            }
        }
        self.fire(RoundEvent::Grounded);
    }

    fn check_matches(&mut self) {
        let lines = affected_lines(self.placed.iter().copied());
        let matches = match self.dictionary.get() {
            Some(dict) => find_matches(&self.grid, &lines, dict, self.config.min_word_length),
            None => Vec::new(),
        };
        if matches.is_empty() {
            self.fire(RoundEvent::SkipAnim);
            return;
        }

        if self.stats.passes > 0 {
            self.stats.chains += 1;
            log::info!("chain x{}", self.stats.passes + 1);
        }
        self.stats.passes += 1;

        for m in matches {
            for &pos in &m.cells {
                self.grid.set_matched(pos, true);
                self.matched.insert(pos);
            }
            log::info!("matched {:?} on {:?}", m.word, m.line);
            self.words.push(m.word);
        }
        self.timers.match_anim_start = self.clock_ms;
        self.fire(RoundEvent::PlayingAnim);
    }

    fn run_match_anim(&mut self) {
        if self.clock_ms - self.timers.match_anim_start < u64::from(MATCH_ANIM_MS) {
            return;
        }
        if self.matched.is_empty() {
            self.fire(RoundEvent::SkipAnim);
            return;
        }
        self.clear_matched();
        self.placed.clear();
        self.fire(RoundEvent::CheckForChain);
    }

    fn finish_matches(&mut self) {
        self.clear_matched();
        self.placed.clear();
        self.fire(RoundEvent::Done);
    }

    fn clear_matched(&mut self) {
        for pos in &self.matched {
            self.grid.clear_cell(*pos);
        }
        self.stats.letters_cleared += self.matched.len() as u32;
        self.matched.clear();
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cells.clear();
        out.cells
            .extend(self.grid.cells().iter().map(|cell| CellSnapshot {
                letter: cell.letter,
                matched: cell.recently_matched,
            }));

        out.piece.clear();
        if let Some(piece) = self.piece {
            out.piece
                .extend(piece.adjusted().iter().map(|cell| PieceCellSnapshot {
                    pos: cell.pos(),
                    letter: cell.letter,
                    id: cell.id,
                }));
        }
        out.piece_visible = self.piece_visible();
        out.fall_progress = match self.state {
            RoundState::PlacingBlock | RoundState::LockDelay => self.physics.progress(),
            _ => 0.0,
        };

        out.state = self.state;
        out.countdown_s = self.countdown_s;
        out.game_over = self.game_over;
        out.dictionary_ready = self.dictionary.is_ready();
        out.words.clone_from(&self.words);

        out.board_falls = self.staged.as_ref().map(|staged| AnimSnapshot {
            cells: staged
                .falls
                .iter()
                .map(|fall| FallAnim {
                    from: fall.from,
                    to: fall.to,
                    letter: fall.letter,
                    duration_ms: staged.duration_ms,
                })
                .collect(),
            elapsed_ms: self.elapsed_since(self.timers.fall_anim_start, staged.duration_ms),
        });
        out.instant_drop = self.instant_drop.map(|drop| {
            let to = drop.from.shifted(drop.target_row - drop.from.anchor.row, 0);
            AnimSnapshot {
                cells: drop
                    .from
                    .adjusted()
                    .iter()
                    .zip(to.positions())
                    .map(|(cell, to)| FallAnim {
                        from: cell.pos(),
                        to,
                        letter: cell.letter,
                        duration_ms: INSTANT_DROP_ANIM_MS,
                    })
                    .collect(),
                elapsed_ms: self.elapsed_since(self.timers.drop_anim_start, INSTANT_DROP_ANIM_MS),
            }
        });

        out.episode_id = self.episode_id;
        out.clock_ms = self.clock_ms;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Record of the round so far
    pub fn summary(&self) -> RoundSummary {
        let longest_word = self
            .words
            .iter()
            .fold(None::<&String>, |best, word| match best {
                Some(b) if b.len() >= word.len() => Some(b),
                _ => Some(word),
            })
            .cloned();
        RoundSummary {
            episode_id: self.episode_id,
            words: self.words.clone(),
            longest_word,
            letters_cleared: self.stats.letters_cleared,
            chains: self.stats.chains,
            pieces_placed: self.stats.pieces_placed,
        }
    }

    fn elapsed_since(&self, start: u64, cap_ms: u32) -> u32 {
        (self.clock_ms.saturating_sub(start)).min(u64::from(cap_ms)) as u32
    }
}
