//! Rule violations reported by game state operations.

use derive_more::{Display, Error};

use crate::types::{GameStatus, ShellId};

/// Reasons an intent is rejected. Rejected intents never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum RuleError {
    /// The intent is only valid in another status.
    #[display("Expected status {expected}, game is in {actual}")]
    WrongStatus {
        /// Status the intent requires.
        expected: GameStatus,
        /// Status the game is in.
        actual: GameStatus,
    },
    /// The stake would leave the allowed range.
    #[display("Stake {stake} outside {min}..={max}")]
    StakeOutOfRange {
        /// Requested stake.
        stake: u32,
        /// Smallest allowed stake.
        min: u32,
        /// Largest allowed stake (the balls the player holds).
        max: u32,
    },
    /// No shell carries this id.
    #[display("No shell with id {_0}")]
    UnknownShell(#[error(not(source))] ShellId),
    /// No shell holds the ball.
    #[display("No shell holds the ball")]
    BallMissing,
}
