//! Core domain types for the shell game.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Stable identity of a shell, `0..SHELL_COUNT`.
pub type ShellId = usize;

/// A cup that may hide the ball.
///
/// The ball travels with the shell's id, never with its position in the row,
/// so shuffling only changes where a shell is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Shell {
    id: ShellId,
    has_ball: bool,
    /// Lifted during a reveal window.
    #[new(default)]
    is_up: bool,
}

impl Shell {
    /// Returns the shell's stable id.
    pub fn id(&self) -> ShellId {
        self.id
    }

    /// Returns true if the ball is under this shell.
    pub fn has_ball(&self) -> bool {
        self.has_ball
    }

    /// Returns true while the shell is lifted.
    pub fn is_up(&self) -> bool {
        self.is_up
    }

    pub(crate) fn set_up(&mut self, is_up: bool) {
        self.is_up = is_up;
    }
}

/// Phase of the game state machine.
///
/// `WaitForStart → ShuffleAnimation → WaitForChoose → (WaitForStart | GameOver)`,
/// and `GameOver → WaitForStart` on restart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GameStatus {
    /// Player is choosing a stake; "Go!" is enabled.
    #[default]
    WaitForStart,
    /// Reveal and shuffle sequence is running.
    ShuffleAnimation,
    /// Player must pick a cup.
    WaitForChoose,
    /// Balls are exhausted; only a restart leaves this state.
    GameOver,
}

impl GameStatus {
    /// Returns the display label for this status.
    #[instrument]
    pub fn label(self) -> &'static str {
        match self {
            Self::WaitForStart => "Place your stake",
            Self::ShuffleAnimation => "Watch the cups...",
            Self::WaitForChoose => "Where is the ball?",
            Self::GameOver => "Game over",
        }
    }
}
