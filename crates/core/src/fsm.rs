//! Round state machine - states, events and the transition table
//!
//! The table is closed: firing an event a state has no edge for is a broken
//! contract between engine components and panics.

use serde::Serialize;

/// Phase of a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundState {
    #[default]
    StartingGame,
    Countdown,
    SpawningBlock,
    PlacingBlock,
    PlayerInstantDropAnim,
    LockDelay,
    FallingLetters,
    FallingLettersAnim,
    CheckingMatches,
    PlayMatchAnimation,
    PostMatchAnimation,
    GameOver,
}

impl RoundState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundState::StartingGame => "startingGame",
            RoundState::Countdown => "countdown",
            RoundState::SpawningBlock => "spawningBlock",
            RoundState::PlacingBlock => "placingBlock",
            RoundState::PlayerInstantDropAnim => "playerInstantDropAnim",
            RoundState::LockDelay => "lockDelay",
            RoundState::FallingLetters => "fallingLetters",
            RoundState::FallingLettersAnim => "fallingLettersAnim",
            RoundState::CheckingMatches => "checkingMatches",
            RoundState::PlayMatchAnimation => "playMatchAnimation",
            RoundState::PostMatchAnimation => "postMatchAnimation",
            RoundState::GameOver => "gameOver",
        }
    }

    /// Follow the edge labelled `event`.
    ///
    /// # Panics
    ///
    /// If this state has no such edge.
    pub fn next(self, event: RoundEvent) -> RoundState {
        self.try_next(event).unwrap_or_else(|| {
            unreachable!("event {} fired from state {}", event.as_str(), self.as_str())
        })
    }

    /// The transition table; `None` for events this state does not accept
    pub fn try_next(self, event: RoundEvent) -> Option<RoundState> {
        use RoundEvent as E;
        use RoundState as S;

        let next = match (self, event) {
            (S::StartingGame, E::Start) => S::Countdown,
            (S::Countdown, E::Done) => S::SpawningBlock,
            (S::SpawningBlock, E::Spawn) => S::PlacingBlock,
            (S::PlacingBlock, E::TouchingBlock) => S::LockDelay,
            (S::PlacingBlock, E::Blocked) => S::GameOver,
            (S::PlacingBlock, E::DoInstantDropAnim) => S::PlayerInstantDropAnim,
            (S::PlayerInstantDropAnim, E::TouchingBlock) => S::LockDelay,
            (S::LockDelay, E::Lock) => S::FallingLetters,
            (S::LockDelay, E::Unlock) => S::PlacingBlock,
            (S::FallingLetters, E::DoAnim) => S::FallingLettersAnim,
            (S::FallingLettersAnim, E::Grounded) => S::CheckingMatches,
            (S::CheckingMatches, E::PlayingAnim) => S::PlayMatchAnimation,
            (S::CheckingMatches, E::SkipAnim) => S::PostMatchAnimation,
            (S::PlayMatchAnimation, E::CheckForChain) => S::FallingLetters,
            (S::PlayMatchAnimation, E::SkipAnim) => S::PostMatchAnimation,
            (S::PostMatchAnimation, E::Done) => S::SpawningBlock,
            (S::GameOver, E::Restart) => S::StartingGame,
            _ => return None,
        };
        Some(next)
    }
}

/// Labels on the transition edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundEvent {
    Start,
    Done,
    Spawn,
    TouchingBlock,
    Blocked,
    DoInstantDropAnim,
    Lock,
    Unlock,
    DoAnim,
    Grounded,
    PlayingAnim,
    SkipAnim,
    CheckForChain,
    Restart,
}

impl RoundEvent {
    pub const ALL: [RoundEvent; 14] = [
        RoundEvent::Start,
        RoundEvent::Done,
        RoundEvent::Spawn,
        RoundEvent::TouchingBlock,
        RoundEvent::Blocked,
        RoundEvent::DoInstantDropAnim,
        RoundEvent::Lock,
        RoundEvent::Unlock,
        RoundEvent::DoAnim,
        RoundEvent::Grounded,
        RoundEvent::PlayingAnim,
        RoundEvent::SkipAnim,
        RoundEvent::CheckForChain,
        RoundEvent::Restart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundEvent::Start => "START",
            RoundEvent::Done => "DONE",
            RoundEvent::Spawn => "SPAWN",
            RoundEvent::TouchingBlock => "TOUCHING_BLOCK",
            RoundEvent::Blocked => "BLOCKED",
            RoundEvent::DoInstantDropAnim => "DO_INSTANT_DROP_ANIM",
            RoundEvent::Lock => "LOCK",
            RoundEvent::Unlock => "UNLOCK",
            RoundEvent::DoAnim => "DO_ANIM",
            RoundEvent::Grounded => "GROUNDED",
            RoundEvent::PlayingAnim => "PLAYING_ANIM",
            RoundEvent::SkipAnim => "SKIP_ANIM",
            RoundEvent::CheckForChain => "CHECK_FOR_CHAIN",
            RoundEvent::Restart => "RESTART",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATES: [RoundState; 12] = [
        RoundState::StartingGame,
        RoundState::Countdown,
        RoundState::SpawningBlock,
        RoundState::PlacingBlock,
        RoundState::PlayerInstantDropAnim,
        RoundState::LockDelay,
        RoundState::FallingLetters,
        RoundState::FallingLettersAnim,
        RoundState::CheckingMatches,
        RoundState::PlayMatchAnimation,
        RoundState::PostMatchAnimation,
        RoundState::GameOver,
    ];

    #[test]
    fn test_blocked_only_from_placing() {
        for state in STATES {
            let next = state.try_next(RoundEvent::Blocked);
            if state == RoundState::PlacingBlock {
                assert_eq!(next, Some(RoundState::GameOver));
            } else {
                assert_eq!(next, None, "{state:?}");
            }
        }
    }

    #[test]
    fn test_game_over_only_restarts() {
        let edges: Vec<_> = RoundEvent::ALL
            .iter()
            .filter_map(|&e| RoundState::GameOver.try_next(e).map(|s| (e, s)))
            .collect();
        assert_eq!(edges, vec![(RoundEvent::Restart, RoundState::StartingGame)]);
    }

    #[test]
    fn test_default_is_initial_state() {
        assert_eq!(RoundState::default(), RoundState::StartingGame);
    }

    #[test]
    fn test_happy_path() {
        let mut state = RoundState::StartingGame;
        for event in [
            RoundEvent::Start,
            RoundEvent::Done,
            RoundEvent::Spawn,
            RoundEvent::TouchingBlock,
            RoundEvent::Lock,
            RoundEvent::DoAnim,
            RoundEvent::Grounded,
            RoundEvent::SkipAnim,
            RoundEvent::Done,
        ] {
            state = state.next(event);
        }
        assert_eq!(state, RoundState::SpawningBlock);
    }

    #[test]
    #[should_panic(expected = "event LOCK fired from state countdown")]
    fn test_unreachable_event_is_fatal() {
        RoundState::Countdown.next(RoundEvent::Lock);
    }
}
