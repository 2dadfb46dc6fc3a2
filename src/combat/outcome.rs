//! Battle results.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Result of a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleResult {
    /// One side is still standing.
    Winner(Side),
    /// Both sides fell together, or the round cap was reached.
    Draw,
}

/// Terminal outcome of `run_battle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub result: BattleResult,
    /// Round in which the battle ended.
    pub rounds: u32,
    /// Whether the safety cap ended the battle.
    pub capped: bool,
}

impl Outcome {
    /// Winning side, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        match self.result {
            BattleResult::Winner(side) => Some(side),
            BattleResult::Draw => None,
        }
    }

    /// Losing side, if any.
    #[must_use]
    pub fn loser(&self) -> Option<Side> {
        self.winner().map(Side::opponent)
    }

    /// Check for a draw.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.result == BattleResult::Draw
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner() == Some(side)
    }
}
