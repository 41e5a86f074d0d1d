//! Game state and the rule operations that mutate it.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::RuleError;
use crate::outcome::RoundOutcome;
use crate::sequence::Step;
use crate::types::{GameStatus, Shell, ShellId};

/// Number of shells on the table.
pub const SHELL_COUNT: usize = 3;
/// Shell that hides the ball for the whole session.
pub const BALL_SHELL: ShellId = 1;
/// Score at the start of a game.
pub const STARTING_SCORE: u32 = 5;
/// Balls held at the start of a game.
pub const STARTING_BALLS: u32 = 5;
/// Smallest stake the player may place.
pub const MIN_STAKE: u32 = 1;
/// A win pays the stake times this.
pub const PAYOUT_MULTIPLIER: u32 = 2;

/// Complete session state observed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    status: GameStatus,
    /// Display order; ids stay fixed while the order changes.
    shells: Vec<Shell>,
    score: u32,
    high_score: u32,
    balls_amount: u32,
    balls_selected: u32,
}

impl GameState {
    /// Creates the opening state with a previously persisted high score.
    #[instrument]
    pub fn new(high_score: u32) -> Self {
        Self {
            status: GameStatus::WaitForStart,
            shells: (0..SHELL_COUNT)
                .map(|id| Shell::new(id, id == BALL_SHELL))
                .collect(),
            score: STARTING_SCORE,
            high_score,
            balls_amount: STARTING_BALLS,
            balls_selected: MIN_STAKE,
        }
    }

    /// Returns the current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the shells in display order.
    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    /// Returns the session score (best balls amount reached).
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the best score across sessions.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Returns the balls the player holds.
    pub fn balls_amount(&self) -> u32 {
        self.balls_amount
    }

    /// Returns the stake for the current round.
    pub fn balls_selected(&self) -> u32 {
        self.balls_selected
    }

    /// Looks a shell up by id.
    pub fn shell(&self, id: ShellId) -> Option<&Shell> {
        self.shells.iter().find(|s| s.id() == id)
    }

    /// Returns the id of the shell hiding the ball.
    pub fn ball_shell_id(&self) -> Option<ShellId> {
        self.shells.iter().find(|s| s.has_ball()).map(Shell::id)
    }

    /// Returns `Ok` if the game is in `expected`.
    pub fn ensure_status(&self, expected: GameStatus) -> Result<(), RuleError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(RuleError::WrongStatus {
                expected,
                actual: self.status,
            })
        }
    }

    /// True if the stake can go up by one right now.
    pub fn can_increase_stake(&self) -> bool {
        self.status == GameStatus::WaitForStart && self.balls_selected < self.balls_amount
    }

    /// True if the stake can go down by one right now.
    pub fn can_decrease_stake(&self) -> bool {
        self.status == GameStatus::WaitForStart && self.balls_selected > MIN_STAKE
    }

    /// Raises the stake by one ball, up to the balls held.
    #[instrument(skip(self), fields(stake = self.balls_selected, balls = self.balls_amount))]
    pub fn increase_stake(&mut self) -> Result<u32, RuleError> {
        self.ensure_status(GameStatus::WaitForStart)?;
        let stake = self.balls_selected + 1;
        self.check_stake(stake)?;
        self.balls_selected = stake;
        debug!(stake, "Stake increased");
        Ok(stake)
    }

    /// Lowers the stake by one ball, down to [`MIN_STAKE`].
    #[instrument(skip(self), fields(stake = self.balls_selected, balls = self.balls_amount))]
    pub fn decrease_stake(&mut self) -> Result<u32, RuleError> {
        self.ensure_status(GameStatus::WaitForStart)?;
        let stake = self.balls_selected.saturating_sub(1);
        self.check_stake(stake)?;
        self.balls_selected = stake;
        debug!(stake, "Stake decreased");
        Ok(stake)
    }

    /// Deducts the stake from the balls held and enters the shuffle.
    ///
    /// Returns the stake placed.
    #[instrument(skip(self), fields(stake = self.balls_selected, balls = self.balls_amount))]
    pub fn place_stake(&mut self) -> Result<u32, RuleError> {
        self.ensure_status(GameStatus::WaitForStart)?;
        self.check_stake(self.balls_selected)?;
        self.balls_amount -= self.balls_selected;
        self.status = GameStatus::ShuffleAnimation;
        info!(
            stake = self.balls_selected,
            balls_left = self.balls_amount,
            "Stake placed"
        );
        Ok(self.balls_selected)
    }

    /// Applies one sequence step.
    #[instrument(skip(self, rng))]
    pub fn apply_step<R: Rng + ?Sized>(&mut self, step: Step, rng: &mut R) -> Result<(), RuleError> {
        match step {
            Step::Raise(id) => self.set_shell_up(id, true),
            Step::Lower(id) => self.set_shell_up(id, false),
            Step::Shuffle => {
                self.shells.shuffle(rng);
                debug!(order = ?self.shell_order(), "Shells shuffled");
                Ok(())
            }
            Step::OpenChoice => {
                self.ensure_status(GameStatus::ShuffleAnimation)?;
                self.status = GameStatus::WaitForChoose;
                debug!("Waiting for the player to choose");
                Ok(())
            }
        }
    }

    /// Settles the round for the chosen cup.
    ///
    /// A win pays `stake × 2` and may raise the score. A loss with balls
    /// left starts a new round; a loss with none ends the game and records a
    /// new high score in memory (the caller persists it).
    #[instrument(skip(self), fields(stake = self.balls_selected, balls = self.balls_amount))]
    pub fn resolve_choice(&mut self, id: ShellId) -> Result<RoundOutcome, RuleError> {
        self.ensure_status(GameStatus::WaitForChoose)?;
        let chosen = *self.shell(id).ok_or(RuleError::UnknownShell(id))?;

        let outcome = if chosen.has_ball() {
            let payout = self.balls_selected * PAYOUT_MULTIPLIER;
            self.balls_amount += payout;
            let new_best = self.balls_amount > self.score;
            if new_best {
                self.score = self.balls_amount;
            }
            self.reset_round();
            RoundOutcome::Won {
                payout,
                balls_amount: self.balls_amount,
                new_best,
            }
        } else if self.balls_amount != 0 {
            self.reset_round();
            RoundOutcome::Lost {
                balls_amount: self.balls_amount,
            }
        } else {
            let new_high_score = self.score > self.high_score;
            if new_high_score {
                self.high_score = self.score;
            }
            self.status = GameStatus::GameOver;
            RoundOutcome::GameOver {
                score: self.score,
                high_score: self.high_score,
                new_high_score,
            }
        };

        info!(chosen = id, outcome = %outcome, "Round resolved");
        Ok(outcome)
    }

    /// Starts a fresh game after a game over. The high score is kept.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), RuleError> {
        self.ensure_status(GameStatus::GameOver)?;
        self.score = STARTING_SCORE;
        self.balls_amount = STARTING_BALLS;
        self.reset_round();
        info!("Game restarted");
        Ok(())
    }

    /// Shell ids in display order.
    pub fn shell_order(&self) -> Vec<ShellId> {
        self.shells.iter().map(Shell::id).collect()
    }

    fn check_stake(&self, stake: u32) -> Result<(), RuleError> {
        if (MIN_STAKE..=self.balls_amount).contains(&stake) {
            Ok(())
        } else {
            Err(RuleError::StakeOutOfRange {
                stake,
                min: MIN_STAKE,
                max: self.balls_amount,
            })
        }
    }

    fn set_shell_up(&mut self, id: ShellId, is_up: bool) -> Result<(), RuleError> {
        let shell = self
            .shells
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(RuleError::UnknownShell(id))?;
        shell.set_up(is_up);
        debug!(id, is_up, "Shell moved");
        Ok(())
    }

    fn reset_round(&mut self) {
        self.shells.sort_by_key(Shell::id);
        self.balls_selected = MIN_STAKE;
        self.status = GameStatus::WaitForStart;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}
