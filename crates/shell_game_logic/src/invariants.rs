//! Invariants that hold for every reachable [`GameState`].
//!
//! The controller checks these after each mutation in debug builds; tests
//! call [`check_all`] directly.

use derive_more::{Display, Error};

use crate::state::{GameState, MIN_STAKE, SHELL_COUNT};
use crate::types::GameStatus;

/// A broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InvariantViolation {
    /// Zero or several shells hold the ball.
    #[display("Expected exactly one ball, found {_0}")]
    BallCount(#[error(not(source))] usize),
    /// Shell ids are not a permutation of `0..SHELL_COUNT`.
    #[display("Shell ids {_0:?} are not a permutation of the shell range")]
    ShellIds(#[error(not(source))] Vec<usize>),
    /// The stake exceeds the balls held while waiting for a start.
    #[display("Stake {stake} does not fit {balls} balls")]
    Stake {
        /// Current stake.
        stake: u32,
        /// Balls held.
        balls: u32,
    },
    /// A shell is lifted outside an animation.
    #[display("Shell {_0} is up while {_1}")]
    LiftedAtRest(usize, GameStatus),
}

/// Exactly one shell hides the ball.
pub fn single_ball(state: &GameState) -> Result<(), InvariantViolation> {
    let count = state.shells().iter().filter(|s| s.has_ball()).count();
    if count == 1 {
        Ok(())
    } else {
        Err(InvariantViolation::BallCount(count))
    }
}

/// Shuffling only reorders: the ids are always `0..SHELL_COUNT`.
pub fn ids_are_permutation(state: &GameState) -> Result<(), InvariantViolation> {
    let mut ids = state.shell_order();
    ids.sort_unstable();
    if ids.iter().copied().eq(0..SHELL_COUNT) {
        Ok(())
    } else {
        Err(InvariantViolation::ShellIds(state.shell_order()))
    }
}

/// `MIN_STAKE <= balls_selected <= balls_amount` while waiting for a start.
pub fn stake_within_pool(state: &GameState) -> Result<(), InvariantViolation> {
    if state.status() != GameStatus::WaitForStart {
        return Ok(());
    }
    let stake = state.balls_selected();
    let balls = state.balls_amount();
    if (MIN_STAKE..=balls).contains(&stake) {
        Ok(())
    } else {
        Err(InvariantViolation::Stake { stake, balls })
    }
}

/// Shells only lift during the shuffle sequence or a reveal of the choice.
pub fn lowered_at_rest(state: &GameState) -> Result<(), InvariantViolation> {
    let animating = matches!(
        state.status(),
        GameStatus::ShuffleAnimation | GameStatus::WaitForChoose
    );
    match state.shells().iter().find(|s| s.is_up()) {
        Some(shell) if !animating => Err(InvariantViolation::LiftedAtRest(
            shell.id(),
            state.status(),
        )),
        _ => Ok(()),
    }
}

/// Runs every check, returning the first violation.
pub fn check_all(state: &GameState) -> Result<(), InvariantViolation> {
    single_ball(state)?;
    ids_are_permutation(state)?;
    stake_within_pool(state)?;
    lowered_at_rest(state)
}
