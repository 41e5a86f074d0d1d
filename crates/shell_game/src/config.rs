//! Game configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use shell_game_logic::SequenceTimings;
use tracing::{debug, info, instrument};

use crate::store::DEFAULT_NAMESPACE;

/// Where the high score is kept.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// Nothing survives the process.
    Memory,
    /// TOML preferences file.
    #[default]
    Toml,
    /// SQLite database.
    Sqlite,
}

impl StoreBackend {
    /// Default file for this backend when no path is configured.
    #[instrument]
    pub fn default_path(self) -> PathBuf {
        match self {
            Self::Memory => PathBuf::new(),
            Self::Toml => PathBuf::from("shell_game_prefs.toml"),
            Self::Sqlite => PathBuf::from("shell_game.db"),
        }
    }
}

/// Score store settings (`[store]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    backend: StoreBackend,
    path: Option<PathBuf>,
    namespace: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl StoreSettings {
    /// Creates settings for `backend` at `path`.
    #[instrument(skip(path))]
    pub fn new(backend: StoreBackend, path: Option<PathBuf>) -> Self {
        Self {
            backend,
            path,
            ..Self::default()
        }
    }

    /// Returns the configured backend.
    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    /// Returns the configured path, or the backend's default.
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| self.backend.default_path())
    }

    /// Returns the storage namespace.
    pub fn namespace(&self) -> &String {
        &self.namespace
    }
}

/// Top-level configuration.
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed; entropy when absent.
    seed: Option<u64>,

    /// Reveal and shuffle durations.
    timings: SequenceTimings,

    /// High score persistence.
    store: StoreSettings,
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(backend = %config.store.backend, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the RNG seed.
    #[instrument(skip(self))]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the sequence timings.
    #[instrument(skip(self))]
    pub fn with_timings(mut self, timings: SequenceTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Replaces the store backend. A path configured for another backend is
    /// dropped in favour of the new backend's default.
    #[instrument(skip(self))]
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        if self.store.backend != backend {
            self.store.path = None;
        }
        self.store.backend = backend;
        self
    }

    /// Replaces the store path.
    #[instrument(skip(self, path))]
    pub fn with_store_path(mut self, path: PathBuf) -> Self {
        self.store.path = Some(path);
        self
    }

    /// Builds the session RNG: seeded if configured, from entropy otherwise.
    #[instrument(skip(self), fields(seed = ?self.seed))]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
