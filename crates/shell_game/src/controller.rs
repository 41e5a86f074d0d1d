//! Game controller: owns the state, runs the timed sequences, persists the
//! high score.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use shell_game_logic::{
    GameState, GameStatus, RoundOutcome, RuleError, SequenceTimings, ShellId, TimedStep,
    invariants,
};
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

use crate::store::ScoreStore;

/// A player intent forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Raise the stake by one ball.
    IncreaseStake,
    /// Lower the stake by one ball.
    DecreaseStake,
    /// Place the stake and shuffle ("Go!").
    Start,
    /// Pick the cup with this id.
    SelectCup(ShellId),
    /// Start over after a game over.
    Restart,
}

/// What an accepted intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The stake changed.
    StakeChanged(u32),
    /// The shuffle finished; a cup must be picked.
    ReadyToChoose {
        /// Stake riding on this round.
        stake: u32,
    },
    /// The chosen cup was revealed and the round settled.
    RoundResolved(RoundOutcome),
    /// A new game began.
    Restarted,
}

/// Drives a single game session.
///
/// Every mutation is published to [`GameController::subscribe`] receivers,
/// including each step of the reveal and shuffle sequences. Intent methods
/// take `&mut self`, so calls are serialized; dropping a pending
/// [`start_game`](Self::start_game) or [`select_cup`](Self::select_cup)
/// future abandons the rest of its sequence.
#[derive(Debug)]
pub struct GameController<S> {
    state: GameState,
    store: S,
    timings: SequenceTimings,
    rng: StdRng,
    updates: watch::Sender<GameState>,
}

impl<S: ScoreStore> GameController<S> {
    /// Creates a controller, reading the high score from `store`.
    ///
    /// A store that cannot be read counts as holding no high score.
    #[instrument(skip(store, rng))]
    pub fn new(store: S, timings: SequenceTimings, rng: StdRng) -> Self {
        let high_score = store.get_score().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read high score, starting from 0");
            0
        });
        info!(high_score, "Creating GameController");

        let state = GameState::new(high_score);
        let (updates, _) = watch::channel(state.clone());
        Self {
            state,
            store,
            timings,
            rng,
            updates,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the score store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a receiver that sees every published state.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.updates.subscribe()
    }

    /// Raises the stake by one ball.
    #[instrument(skip(self))]
    pub fn increase_stake(&mut self) -> Result<u32, RuleError> {
        let stake = self.state.increase_stake()?;
        self.publish();
        Ok(stake)
    }

    /// Lowers the stake by one ball.
    #[instrument(skip(self))]
    pub fn decrease_stake(&mut self) -> Result<u32, RuleError> {
        let stake = self.state.decrease_stake()?;
        self.publish();
        Ok(stake)
    }

    /// Places the stake, reveals the ball, shuffles, and waits for a choice.
    ///
    /// Resolves once the status is [`GameStatus::WaitForChoose`].
    #[instrument(skip(self))]
    pub async fn start_game(&mut self) -> Result<u32, RuleError> {
        let ball = self.state.ball_shell_id().ok_or(RuleError::BallMissing)?;
        let stake = self.state.place_stake()?;
        self.publish();

        let steps = self.timings.shuffle_round(ball);
        self.run(steps).await?;
        info!(stake, "Shuffle finished");
        Ok(stake)
    }

    /// Reveals the chosen cup and settles the round.
    ///
    /// A game over that beats the high score persists it before returning.
    #[instrument(skip(self))]
    pub async fn select_cup(&mut self, id: ShellId) -> Result<RoundOutcome, RuleError> {
        self.state.ensure_status(GameStatus::WaitForChoose)?;
        if self.state.shell(id).is_none() {
            return Err(RuleError::UnknownShell(id));
        }

        let steps = self.timings.reveal(id);
        self.run(steps).await?;

        let outcome = self.state.resolve_choice(id)?;
        if let Some(score) = outcome.high_score_to_persist() {
            self.persist_high_score(score);
        }
        self.publish();
        Ok(outcome)
    }

    /// Starts a new game after a game over.
    #[instrument(skip(self))]
    pub fn restart_game(&mut self) -> Result<(), RuleError> {
        self.state.restart()?;
        self.publish();
        Ok(())
    }

    /// Dispatches an intent and reports what it did.
    #[instrument(skip(self))]
    pub async fn handle(&mut self, intent: Intent) -> Result<GameEvent, RuleError> {
        match intent {
            Intent::IncreaseStake => self.increase_stake().map(GameEvent::StakeChanged),
            Intent::DecreaseStake => self.decrease_stake().map(GameEvent::StakeChanged),
            Intent::Start => self
                .start_game()
                .await
                .map(|stake| GameEvent::ReadyToChoose { stake }),
            Intent::SelectCup(id) => self.select_cup(id).await.map(GameEvent::RoundResolved),
            Intent::Restart => self.restart_game().map(|()| GameEvent::Restarted),
        }
    }

    /// Applies each step, publishes, then waits.
    async fn run(&mut self, steps: Vec<TimedStep>) -> Result<(), RuleError> {
        for timed in steps {
            self.state.apply_step(timed.step(), &mut self.rng)?;
            self.publish();
            if !timed.wait().is_zero() {
                sleep(timed.wait()).await;
            }
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn persist_high_score(&self, score: u32) {
        match self.store.set_score(score) {
            Ok(()) => info!(score, "New high score persisted"),
            Err(e) => error!(error = %e, score, "Failed to persist high score"),
        }
    }

    fn publish(&self) {
        let checked = invariants::check_all(&self.state);
        debug_assert!(checked.is_ok(), "invariant violated: {checked:?}");
        if let Err(violation) = checked {
            error!(%violation, "Game state invariant violated");
        }
        debug!(status = %self.state.status(), "Publishing state");
        self.updates.send_replace(self.state.clone());
    }
}
