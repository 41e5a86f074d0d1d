//! Shell game application layer.
//!
//! Wraps the pure rules from [`shell_game_logic`] with everything a playable
//! game needs.
//!
//! # Architecture
//!
//! - **Controller**: owns the state, runs the timed reveal and shuffle
//!   sequences, persists the high score
//! - **Session**: an actor task that handles intents one at a time
//! - **Store**: high score persistence (TOML, SQLite or in memory)
//! - **TUI**: ratatui front end that renders the state and sends intents
//!
//! # Example
//!
//! ```no_run
//! use shell_game::{GameController, GameSession, Intent, MemoryScoreStore, SequenceTimings};
//! use rand::SeedableRng;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let controller = GameController::new(
//!     MemoryScoreStore::new(),
//!     SequenceTimings::default(),
//!     rand::rngs::StdRng::seed_from_u64(1),
//! );
//! let mut session = GameSession::spawn(controller);
//! session.send(Intent::Start)?;
//! let report = session.next_report().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod session;
mod store;

pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, StoreBackend, StoreSettings};

// Crate-level exports - Controller
pub use controller::{GameController, GameEvent, Intent};

// Crate-level exports - Session
pub use session::{GameSession, SessionClosed, SessionReport};

// Crate-level exports - Persistence
pub use store::{
    DEFAULT_NAMESPACE, HIGH_SCORE_KEY, MemoryScoreStore, Preference, ScoreStore,
    SqliteScoreStore, StoreError, TomlScoreStore, open_store,
};

// Crate-level exports - Game rules
pub use shell_game_logic::{
    GameState, GameStatus, RoundOutcome, RuleError, SequenceTimings, Shell, ShellId,
};
