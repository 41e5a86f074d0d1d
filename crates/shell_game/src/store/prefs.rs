//! High score kept in a TOML preferences file.
//!
//! Each storage namespace is a table; the score lives under
//! [`HIGH_SCORE_KEY`]. Tables belonging to other namespaces are left
//! untouched on write.
//!
//! ```toml
//! [shell_game]
//! saved_high_score = 12
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::store::{HIGH_SCORE_KEY, ScoreStore, StoreError};

/// Preferences-file backed score store.
#[derive(Debug, Clone)]
pub struct TomlScoreStore {
    path: PathBuf,
    namespace: String,
}

impl TomlScoreStore {
    /// Creates a store for `namespace` inside the file at `path`.
    ///
    /// The file is not touched until the first read or write.
    #[instrument(skip(path, namespace), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            namespace: namespace.into(),
        }
    }

    /// Returns the preferences file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_table(&self) -> Result<toml::Table, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Preferences file missing, starting empty");
                return Ok(toml::Table::new());
            }
            Err(e) => {
                return Err(StoreError::new(format!(
                    "Failed to read '{}': {}",
                    self.path.display(),
                    e
                )));
            }
        };

        toml::from_str(&content).map_err(|e| {
            StoreError::new(format!("Failed to parse '{}': {}", self.path.display(), e))
        })
    }

    #[instrument(skip(self, table), fields(path = %self.path.display()))]
    fn write_table(&self, table: &toml::Table) -> Result<(), StoreError> {
        let content = toml::to_string(table)
            .map_err(|e| StoreError::new(format!("Failed to encode preferences: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        // Write beside the target and rename so a crash never leaves half a file.
        let staging = self.path.with_extension("toml.tmp");
        std::fs::write(&staging, content).map_err(|e| {
            StoreError::new(format!("Failed to write '{}': {}", staging.display(), e))
        })?;
        std::fs::rename(&staging, &self.path).map_err(|e| {
            StoreError::new(format!("Failed to replace '{}': {}", self.path.display(), e))
        })
    }
}

impl ScoreStore for TomlScoreStore {
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    fn get_score(&self) -> Result<u32, StoreError> {
        let table = self.read_table()?;
        let value = table
            .get(&self.namespace)
            .and_then(|section| section.get(HIGH_SCORE_KEY));

        let score = match value {
            None => 0,
            Some(toml::Value::Integer(n)) => u32::try_from(*n)
                .map_err(|_| StoreError::new(format!("High score {} out of range", n)))?,
            Some(other) => {
                return Err(StoreError::new(format!(
                    "Expected integer for '{}', found {}",
                    HIGH_SCORE_KEY,
                    other.type_str()
                )));
            }
        };

        debug!(score, "Read high score from preferences");
        Ok(score)
    }

    #[instrument(skip(self), fields(namespace = %self.namespace))]
    fn set_score(&self, score: u32) -> Result<(), StoreError> {
        let mut table = self.read_table()?;

        if !table.contains_key(&self.namespace) {
            table.insert(
                self.namespace.clone(),
                toml::Value::Table(toml::Table::new()),
            );
        }
        let section = table
            .get_mut(&self.namespace)
            .and_then(toml::Value::as_table_mut)
            .ok_or_else(|| {
                StoreError::new(format!("'{}' is not a table", self.namespace))
            })?;
        section.insert(HIGH_SCORE_KEY.to_string(), toml::Value::Integer(i64::from(score)));

        self.write_table(&table)?;
        info!(score, path = %self.path.display(), "High score saved");
        Ok(())
    }
}
