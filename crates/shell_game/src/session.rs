//! Session actor: one task owns the controller and handles intents in order.

use derive_more::{Display, Error};
use shell_game_logic::{GameState, RuleError};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::controller::{GameController, GameEvent, Intent};
use crate::store::ScoreStore;

/// Report from the session task for each intent it processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionReport {
    /// The intent was accepted.
    Accepted(GameEvent),
    /// The intent did not fit the current state and changed nothing.
    Rejected {
        /// The rejected intent.
        intent: Intent,
        /// Why it was rejected.
        error: RuleError,
    },
}

/// Sending to a session whose task has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Game session closed")]
pub struct SessionClosed;

/// Handle to a running game session.
///
/// Dropping the handle aborts the session task: any reveal or shuffle still
/// waiting on a timer is abandoned without further mutation.
#[derive(Debug)]
pub struct GameSession {
    intents: mpsc::UnboundedSender<Intent>,
    reports: mpsc::UnboundedReceiver<SessionReport>,
    state: watch::Receiver<GameState>,
    task: JoinHandle<()>,
}

impl GameSession {
    /// Moves `controller` onto a new task and returns its handle.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(controller))]
    pub fn spawn<S>(controller: GameController<S>) -> Self
    where
        S: ScoreStore + 'static,
    {
        let state = controller.subscribe();
        let (intents, intent_rx) = mpsc::unbounded_channel();
        let (report_tx, reports) = mpsc::unbounded_channel();

        let task = tokio::spawn(drive(controller, intent_rx, report_tx));
        info!("Game session started");

        Self {
            intents,
            reports,
            state,
            task,
        }
    }

    /// Queues an intent. Intents run one at a time in arrival order.
    #[instrument(skip(self))]
    pub fn send(&self, intent: Intent) -> Result<(), SessionClosed> {
        self.intents.send(intent).map_err(|_| {
            warn!(?intent, "Session task is gone");
            SessionClosed
        })
    }

    /// Returns a copy of the latest published state.
    pub fn state(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Returns a receiver for state changes.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.clone()
    }

    /// Waits for the next report; `None` once the task has stopped.
    pub async fn next_report(&mut self) -> Option<SessionReport> {
        self.reports.recv().await
    }

    /// Returns a pending report without waiting.
    pub fn try_next_report(&mut self) -> Option<SessionReport> {
        self.reports.try_recv().ok()
    }

    /// True once the session task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        debug!("Aborting game session task");
        self.task.abort();
    }
}

/// Session task body: handle intents until every sender is gone.
#[instrument(skip_all)]
async fn drive<S: ScoreStore>(
    mut controller: GameController<S>,
    mut intents: mpsc::UnboundedReceiver<Intent>,
    reports: mpsc::UnboundedSender<SessionReport>,
) {
    while let Some(intent) = intents.recv().await {
        let report = match controller.handle(intent).await {
            Ok(event) => SessionReport::Accepted(event),
            Err(error) => {
                debug!(?intent, %error, "Intent rejected");
                SessionReport::Rejected { intent, error }
            }
        };
        if reports.send(report).is_err() {
            debug!("Report receiver dropped");
        }
    }
    info!("Game session finished");
}
