//! Pure shell game rules.
//!
//! Three shells, one ball, a stake and a score. [`GameState`] holds the
//! session and enforces every rule; [`SequenceTimings`] describes the timed
//! reveal and shuffle sequences as plain step lists so that any driver (an
//! async controller, a test, a replay) can execute them.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use shell_game_logic::{GameState, GameStatus, RoundOutcome, SequenceTimings};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut state = GameState::new(0);
//! let ball = state.ball_shell_id().unwrap();
//!
//! state.place_stake().unwrap();
//! for timed in SequenceTimings::instant().shuffle_round(ball) {
//!     state.apply_step(timed.step(), &mut rng).unwrap();
//! }
//! assert_eq!(state.status(), GameStatus::WaitForChoose);
//!
//! let outcome = state.resolve_choice(ball).unwrap();
//! assert!(matches!(outcome, RoundOutcome::Won { payout: 2, .. }));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod invariants;
mod outcome;
mod sequence;
mod state;
mod types;

pub use error::RuleError;
pub use invariants::InvariantViolation;
pub use outcome::RoundOutcome;
pub use sequence::{SequenceTimings, Step, TimedStep, total_duration};
pub use state::{
    BALL_SHELL, GameState, MIN_STAKE, PAYOUT_MULTIPLIER, SHELL_COUNT, STARTING_BALLS,
    STARTING_SCORE,
};
pub use types::{GameStatus, Shell, ShellId};
