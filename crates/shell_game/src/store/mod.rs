//! High score persistence.
//!
//! The controller only needs [`ScoreStore`]: read the best score once at
//! construction, write it when a game ends with a new best.

mod db;
mod error;
mod memory;
mod prefs;

use std::sync::Arc;

use tracing::{info, instrument};

pub use db::{Preference, SqliteScoreStore};
pub use error::StoreError;
pub use memory::MemoryScoreStore;
pub use prefs::TomlScoreStore;

use crate::config::{StoreBackend, StoreSettings};

/// Storage namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "shell_game";

/// Key of the persisted high score inside a namespace.
pub const HIGH_SCORE_KEY: &str = "saved_high_score";

/// Persists the single best score.
pub trait ScoreStore: Send + Sync {
    /// Returns the stored best score, or 0 if none was ever stored.
    fn get_score(&self) -> Result<u32, StoreError>;

    /// Durably stores `score` as the best score.
    fn set_score(&self, score: u32) -> Result<(), StoreError>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn get_score(&self) -> Result<u32, StoreError> {
        (**self).get_score()
    }

    fn set_score(&self, score: u32) -> Result<(), StoreError> {
        (**self).set_score(score)
    }
}

impl<T: ScoreStore + ?Sized> ScoreStore for Arc<T> {
    fn get_score(&self) -> Result<u32, StoreError> {
        (**self).get_score()
    }

    fn set_score(&self, score: u32) -> Result<(), StoreError> {
        (**self).set_score(score)
    }
}

/// Opens the backend described by `settings`.
///
/// # Errors
///
/// Returns [`StoreError`] if the SQLite database cannot be opened.
#[instrument(skip(settings), fields(backend = %settings.backend()))]
pub fn open_store(settings: &StoreSettings) -> Result<Box<dyn ScoreStore>, StoreError> {
    let store: Box<dyn ScoreStore> = match settings.backend() {
        StoreBackend::Memory => Box::new(MemoryScoreStore::new()),
        StoreBackend::Toml => Box::new(TomlScoreStore::new(
            settings.path(),
            settings.namespace().clone(),
        )),
        StoreBackend::Sqlite => Box::new(SqliteScoreStore::open(
            settings.path().to_string_lossy(),
            settings.namespace().clone(),
        )?),
    };
    info!(path = %settings.path().display(), "Score store opened");
    Ok(store)
}
