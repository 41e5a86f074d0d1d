//! Result of resolving a chosen cup.

use serde::{Deserialize, Serialize};

/// What happened when the player picked a cup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The ball was under the chosen cup.
    Won {
        /// Balls paid out (stake × 2).
        payout: u32,
        /// Balls held after the payout.
        balls_amount: u32,
        /// True if the payout raised the session score.
        new_best: bool,
    },
    /// Wrong cup, but balls remain for another round.
    Lost {
        /// Balls left after losing the stake.
        balls_amount: u32,
    },
    /// Wrong cup with no balls left.
    GameOver {
        /// Final session score.
        score: u32,
        /// High score after this game.
        high_score: u32,
        /// True if `score` beat the previous high score and must be persisted.
        new_high_score: bool,
    },
}

impl RoundOutcome {
    /// Returns true for [`RoundOutcome::Won`].
    pub fn is_win(&self) -> bool {
        matches!(self, Self::Won { .. })
    }

    /// Returns the score to persist, if this outcome set a new high score.
    pub fn high_score_to_persist(&self) -> Option<u32> {
        match self {
            Self::GameOver {
                score,
                new_high_score: true,
                ..
            } => Some(*score),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won { payout, .. } => write!(f, "Found it! +{} balls", payout),
            Self::Lost { balls_amount } => write!(f, "Empty cup. {} balls left", balls_amount),
            Self::GameOver {
                score,
                new_high_score: true,
                ..
            } => write!(f, "Game over. New high score: {}", score),
            Self::GameOver { score, .. } => write!(f, "Game over. Score: {}", score),
        }
    }
}
