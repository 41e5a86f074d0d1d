//! High score kept in a SQLite preferences table.

mod models;
mod schema; // Diesel generated schema - internal use only

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

pub use models::Preference;

use crate::store::{HIGH_SCORE_KEY, ScoreStore, StoreError};
use models::NewPreference;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite backed score store.
#[derive(Debug, Clone)]
pub struct SqliteScoreStore {
    db_path: String,
    namespace: String,
}

impl SqliteScoreStore {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path, namespace), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>, namespace: impl Into<String>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.as_ref().to_string(),
            namespace: namespace.into(),
        };

        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Failed to run migrations: {}", e)))?;
        info!(applied = applied.len(), "SQLite score store ready");

        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Returns the stored high score row, including when it was written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub fn high_score_record(&self) -> Result<Option<Preference>, StoreError> {
        let mut conn = self.connection()?;

        let record = schema::preferences::table
            .filter(schema::preferences::namespace.eq(&self.namespace))
            .filter(schema::preferences::name.eq(HIGH_SCORE_KEY))
            .select(Preference::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(record)
    }
}

impl ScoreStore for SqliteScoreStore {
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    fn get_score(&self) -> Result<u32, StoreError> {
        let score = match self.high_score_record()? {
            Some(record) => u32::try_from(*record.value()).map_err(|_| {
                StoreError::new(format!("High score {} out of range", record.value()))
            })?,
            None => 0,
        };

        debug!(score, "Read high score from database");
        Ok(score)
    }

    #[instrument(skip(self), fields(namespace = %self.namespace))]
    fn set_score(&self, score: u32) -> Result<(), StoreError> {
        let value = i32::try_from(score)
            .map_err(|_| StoreError::new(format!("High score {} too large to store", score)))?;
        let mut conn = self.connection()?;

        let row = NewPreference::new(
            self.namespace.clone(),
            HIGH_SCORE_KEY.to_string(),
            value,
            chrono::Utc::now().naive_utc(),
        );
        diesel::replace_into(schema::preferences::table)
            .values(&row)
            .execute(&mut conn)?;

        info!(score, "High score saved");
        Ok(())
    }
}
