//! Terminal front end state: cup cursor and status line.
//!
//! Keys are gated by status and stake bounds, so only intents that fit the
//! current state are sent.

use crossterm::event::KeyCode;
use shell_game_logic::{GameState, GameStatus};
use tracing::{debug, instrument};

use crate::controller::{GameEvent, Intent};
use crate::session::SessionReport;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nothing to do.
    None,
    /// Forward an intent to the session.
    Send(Intent),
    /// Leave the game.
    Quit,
}

/// UI-only state.
#[derive(Debug, Clone)]
pub struct App {
    cursor: usize,
    message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the UI state with the cursor on the first cup.
    pub fn new() -> Self {
        Self {
            cursor: 0,
            message: GameStatus::WaitForStart.label().to_string(),
        }
    }

    /// Display slot the cursor is on.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Status line text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Maps a key to an action for the given state.
    #[instrument(skip(self, state), fields(status = %state.status()))]
    pub fn handle_key(&mut self, key: KeyCode, state: &GameState) -> AppAction {
        let status = state.status();
        let revealing = state.shells().iter().any(|s| s.is_up());

        let action = match key {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                AppAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(state.shells().len().saturating_sub(1));
                AppAction::None
            }
            KeyCode::Up | KeyCode::Char('+' | '=') if state.can_increase_stake() => {
                AppAction::Send(Intent::IncreaseStake)
            }
            KeyCode::Down | KeyCode::Char('-') if state.can_decrease_stake() => {
                AppAction::Send(Intent::DecreaseStake)
            }
            KeyCode::Char(c @ '1'..='9') if status == GameStatus::WaitForChoose && !revealing => {
                let slot = c as usize - '1' as usize;
                match state.shells().get(slot) {
                    Some(shell) => {
                        self.cursor = slot;
                        AppAction::Send(Intent::SelectCup(shell.id()))
                    }
                    None => AppAction::None,
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match status {
                GameStatus::WaitForStart => AppAction::Send(Intent::Start),
                GameStatus::WaitForChoose if !revealing => state
                    .shells()
                    .get(self.cursor)
                    .map(|shell| AppAction::Send(Intent::SelectCup(shell.id())))
                    .unwrap_or(AppAction::None),
                GameStatus::GameOver => AppAction::Send(Intent::Restart),
                _ => AppAction::None,
            },
            KeyCode::Char('r') if status == GameStatus::GameOver => {
                AppAction::Send(Intent::Restart)
            }
            _ => AppAction::None,
        };

        if let AppAction::Send(intent) = action {
            debug!(?intent, "Key mapped to intent");
            match intent {
                Intent::Start => self.message = GameStatus::ShuffleAnimation.label().to_string(),
                Intent::SelectCup(_) => self.message = "Lifting the cup...".to_string(),
                _ => {}
            }
        }
        action
    }

    /// Updates the status line from a session report.
    #[instrument(skip(self))]
    pub fn handle_report(&mut self, report: SessionReport) {
        self.message = match report {
            SessionReport::Accepted(GameEvent::StakeChanged(stake)) => format!("Stake: {}", stake),
            SessionReport::Accepted(GameEvent::ReadyToChoose { stake }) => format!(
                "{} {} balls riding. ←/→ and Enter, or 1-3",
                GameStatus::WaitForChoose.label(),
                stake
            ),
            SessionReport::Accepted(GameEvent::RoundResolved(outcome)) => outcome.to_string(),
            SessionReport::Accepted(GameEvent::Restarted) => {
                self.cursor = 0;
                format!("New game. {}", GameStatus::WaitForStart.label())
            }
            SessionReport::Rejected { error, .. } => error.to_string(),
        };
    }
}
