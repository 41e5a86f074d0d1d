//! Timed animation sequences as explicit step lists.
//!
//! A sequence is a finite list of [`TimedStep`]s: apply the step's mutation,
//! then wait. Whoever drives the list owns the clock; the logic crate never
//! sleeps.

use std::time::Duration;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::ShellId;

/// A single state mutation inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Lift the shell with this id.
    Raise(ShellId),
    /// Put the shell with this id back down.
    Lower(ShellId),
    /// Uniformly permute the shell row.
    Shuffle,
    /// Sequence done; the player may pick a cup.
    OpenChoice,
}

/// A step and the pause that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedStep {
    step: Step,
    wait: Duration,
}

impl TimedStep {
    /// Creates a step followed by `wait`.
    pub fn new(step: Step, wait: Duration) -> Self {
        Self { step, wait }
    }

    /// Returns the mutation.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Returns the pause after the mutation.
    pub fn wait(&self) -> Duration {
        self.wait
    }
}

/// Durations and repetition counts of the reveal and shuffle sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SequenceTimings {
    /// How long a lifted shell stays up.
    reveal_up_ms: u64,
    /// Pause after a shell is lowered.
    reveal_down_ms: u64,
    /// Number of permutations per round.
    shuffle_count: u32,
    /// Pause after each permutation.
    shuffle_interval_ms: u64,
}

impl Default for SequenceTimings {
    fn default() -> Self {
        Self {
            reveal_up_ms: 2000,
            reveal_down_ms: 1000,
            shuffle_count: 5,
            shuffle_interval_ms: 500,
        }
    }
}

impl SequenceTimings {
    /// Same step counts as the default, with every wait set to zero.
    #[instrument]
    pub fn instant() -> Self {
        Self::default()
            .with_reveal_up_ms(0)
            .with_reveal_down_ms(0)
            .with_shuffle_interval_ms(0)
    }

    /// Returns how many permutations a round performs.
    pub fn shuffle_count(&self) -> u32 {
        self.shuffle_count
    }

    /// Lift a shell, hold, lower it, pause.
    #[instrument(skip(self))]
    pub fn reveal(&self, id: ShellId) -> Vec<TimedStep> {
        vec![
            TimedStep::new(Step::Raise(id), Duration::from_millis(self.reveal_up_ms)),
            TimedStep::new(Step::Lower(id), Duration::from_millis(self.reveal_down_ms)),
        ]
    }

    /// Reveal the ball, shuffle repeatedly, then open the choice.
    #[instrument(skip(self))]
    pub fn shuffle_round(&self, ball: ShellId) -> Vec<TimedStep> {
        let interval = Duration::from_millis(self.shuffle_interval_ms);
        let mut steps = self.reveal(ball);
        steps.extend((0..self.shuffle_count).map(|_| TimedStep::new(Step::Shuffle, interval)));
        steps.push(TimedStep::new(Step::OpenChoice, Duration::ZERO));
        steps
    }
}

/// Sum of all waits in a sequence.
pub fn total_duration(steps: &[TimedStep]) -> Duration {
    steps.iter().map(TimedStep::wait).sum()
}
