//! Terminal UI for the shell game.
//!
//! The UI never mutates game state. It reads the session's latest state each
//! frame, maps keys to intents, and shows the session's reports in a status
//! line.

mod app;
mod ui;

pub use app::{App, AppAction};

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, error, info, instrument};

use crate::session::GameSession;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the TUI until the player quits.
///
/// The terminal is restored even when the loop fails.
pub async fn run_tui(session: &mut GameSession) -> Result<()> {
    info!("Starting shell game TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, session).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI exited");
    res
}

#[instrument(skip_all)]
async fn run_loop(terminal: &mut Term, session: &mut GameSession) -> Result<()> {
    let mut app = App::new();

    loop {
        while let Some(report) = session.try_next_report() {
            app.handle_report(report);
        }

        let state = session.state();
        terminal.draw(|f| ui::draw(f, &state, &app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                debug!(code = ?key.code, "Key pressed");

                match app.handle_key(key.code, &state) {
                    AppAction::Quit => {
                        info!("User quit");
                        return Ok(());
                    }
                    AppAction::Send(intent) => session.send(intent)?,
                    AppAction::None => {}
                }
            }
        }

        // Let the session task run its timers between frames
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
