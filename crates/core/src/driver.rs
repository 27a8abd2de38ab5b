//! Fixed-step driver - converts irregular wall-clock polls into whole
//! simulation steps
//!
//! Input gathered between polls is parked in a bounded mailbox and applied
//! right before the next step runs, so every action lands at a
//! deterministic simulation time.

use arrayvec::ArrayVec;

use crate::round::Round;
use crate::types::{GameAction, FRAME_STEP_MS};

/// Actions buffered between two steps; extra input is dropped
pub const MAILBOX_CAPACITY: usize = 32;

/// Wall-clock time credited per poll at most (keeps a stalled terminal
/// from replaying seconds of simulation at once)
pub const MAX_POLL_ELAPSED_MS: u32 = 250;

#[derive(Debug, Clone, Default)]
pub struct FixedStepDriver {
    accumulator_ms: u32,
    mailbox: ArrayVec<GameAction, MAILBOX_CAPACITY>,
    dropped: u32,
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action for the next step; `false` when the mailbox is full
    pub fn queue(&mut self, action: GameAction) -> bool {
        if self.mailbox.try_push(action).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        true
    }

    pub fn pending(&self) -> &[GameAction] {
        &self.mailbox
    }

    pub fn accumulator_ms(&self) -> u32 {
        self.accumulator_ms
    }

    /// Actions discarded because the mailbox was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Credit `elapsed_ms` of wall time and run as many steps as it covers.
    ///
    /// Queued actions are applied before the first step; if the credit does
    /// not reach a full step they stay queued. Returns the number of steps.
    pub fn advance(&mut self, elapsed_ms: u32, round: &mut Round) -> u32 {
        self.accumulator_ms += elapsed_ms.min(MAX_POLL_ELAPSED_MS);

        let mut steps = 0;
        while self.accumulator_ms >= FRAME_STEP_MS {
            for action in self.mailbox.drain(..) {
                round.apply_action(action);
            }
            round.step();
            self.accumulator_ms -= FRAME_STEP_MS;
            steps += 1;
        }
        steps
    }
}
