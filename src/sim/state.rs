//! Game state types
//!
//! Mutated only through `Game` operations; never persisted.

use serde::{Deserialize, Serialize};

use super::services::TimerHandle;

/// Stage of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Waiting for the player to press start
    Pregame,
    /// Numbers visible while tiles start moving
    Learning,
    /// Numbers hidden, player clicks from memory
    Playing,
    /// Round over, see `Outcome`
    Postgame,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pregame => "pregame",
            Stage::Learning => "learning",
            Stage::Playing => "playing",
            Stage::Postgame => "postgame",
        }
    }

    /// A round is running and accepting clicks
    pub fn is_active(&self) -> bool {
        matches!(self, Stage::Learning | Stage::Playing)
    }
}

/// Result of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Undecided,
    Passed,
    Failed,
}

impl Outcome {
    /// Short status label ("" while undecided)
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Undecided => "",
            Outcome::Passed => "Passed",
            Outcome::Failed => "Failed",
        }
    }
}

/// What a tile click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Correct tile, `next` is now expected
    Advanced { next: u32 },
    /// Last tile clicked in order
    Passed,
    /// A tile was skipped
    Failed,
    /// Stale or duplicate click, or no round running
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub stage: Stage,
    /// Next tile number the player must click (1-based)
    pub expected: u32,
    pub tile_count: u32,
    pub outcome: Outcome,
    /// Learning countdown, if armed
    pub pending_timer: Option<TimerHandle>,
}

impl GameState {
    pub fn new(tile_count: u32) -> Self {
        Self {
            stage: Stage::Pregame,
            expected: 1,
            tile_count,
            outcome: Outcome::Undecided,
            pending_timer: None,
        }
    }

    /// Tile `number` was already clicked correctly (or the round was won)
    pub fn is_confirmed(&self, number: u32) -> bool {
        number < self.expected || self.outcome == Outcome::Passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_pregame() {
        let state = GameState::new(6);
        assert_eq!(state.stage, Stage::Pregame);
        assert_eq!(state.expected, 1);
        assert_eq!(state.outcome, Outcome::Undecided);
        assert!(state.pending_timer.is_none());
    }

    #[test]
    fn test_confirmed_tiles() {
        let mut state = GameState::new(4);
        state.expected = 3;
        assert!(state.is_confirmed(1));
        assert!(state.is_confirmed(2));
        assert!(!state.is_confirmed(3));

        state.outcome = Outcome::Passed;
        assert!(state.is_confirmed(4));
    }
}
