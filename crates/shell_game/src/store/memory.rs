//! In-process score store.

use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::store::{ScoreStore, StoreError};

/// Keeps the high score in memory for the lifetime of the process.
///
/// Clones share the same slot, so a test can hand one clone to a controller
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    inner: Arc<Mutex<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    score: Option<u32>,
    writes: usize,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `score`.
    #[instrument]
    pub fn with_score(score: u32) -> Self {
        let store = Self::default();
        if let Ok(mut slot) = store.inner.lock() {
            slot.score = Some(score);
        }
        store
    }

    /// Number of `set_score` calls so far.
    #[instrument(skip(self))]
    pub fn writes(&self) -> usize {
        self.inner.lock().map(|slot| slot.writes).unwrap_or_default()
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, MemorySlot>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))
    }
}

impl ScoreStore for MemoryScoreStore {
    #[instrument(skip(self))]
    fn get_score(&self) -> Result<u32, StoreError> {
        let score = self.slot()?.score.unwrap_or_default();
        debug!(score, "Read high score from memory");
        Ok(score)
    }

    #[instrument(skip(self))]
    fn set_score(&self, score: u32) -> Result<(), StoreError> {
        let mut slot = self.slot()?;
        slot.score = Some(score);
        slot.writes += 1;
        debug!(score, writes = slot.writes, "Stored high score in memory");
        Ok(())
    }
}
