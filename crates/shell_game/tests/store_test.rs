//! Tests for high score persistence backends.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::{NamedTempFile, TempDir};

use shell_game::{
    DEFAULT_NAMESPACE, GameController, HIGH_SCORE_KEY, MemoryScoreStore, ScoreStore,
    SequenceTimings, SqliteScoreStore, StoreBackend, StoreSettings, TomlScoreStore, open_store,
};

/// Creates an empty SQLite store; the file handle must stay in scope.
fn setup_sqlite(namespace: &str) -> (NamedTempFile, SqliteScoreStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteScoreStore::open(db_path, namespace).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_memory_store_starts_at_zero() {
    let store = MemoryScoreStore::new();
    assert_eq!(store.get_score().expect("Read failed"), 0);
    assert_eq!(store.writes(), 0);
}

#[test]
fn test_memory_store_clones_share_score() {
    let store = MemoryScoreStore::new();
    let handle = store.clone();
    store.set_score(8).expect("Write failed");
    assert_eq!(handle.get_score().expect("Read failed"), 8);
    assert_eq!(handle.writes(), 1);
}

#[test]
fn test_toml_missing_file_reads_zero() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = TomlScoreStore::new(dir.path().join("prefs.toml"), DEFAULT_NAMESPACE);
    assert_eq!(store.get_score().expect("Read failed"), 0);
    assert!(!store.path().exists(), "Reading must not create the file");
}

#[test]
fn test_toml_round_trip_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("prefs.toml");

    TomlScoreStore::new(&path, DEFAULT_NAMESPACE)
        .set_score(12)
        .expect("Write failed");

    let reopened = TomlScoreStore::new(&path, DEFAULT_NAMESPACE);
    assert_eq!(reopened.get_score().expect("Read failed"), 12);

    let content = std::fs::read_to_string(&path).expect("Read file failed");
    assert!(content.contains(&format!("[{}]", DEFAULT_NAMESPACE)));
    assert!(content.contains(&format!("{} = 12", HIGH_SCORE_KEY)));
}

#[test]
fn test_toml_write_preserves_other_namespaces() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "[other_app]\nvolume = 3\n").expect("Seed failed");

    TomlScoreStore::new(&path, DEFAULT_NAMESPACE)
        .set_score(4)
        .expect("Write failed");

    let table: toml::Table =
        toml::from_str(&std::fs::read_to_string(&path).expect("Read failed")).expect("Parse");
    assert_eq!(table["other_app"]["volume"].as_integer(), Some(3));
    assert_eq!(
        table[DEFAULT_NAMESPACE][HIGH_SCORE_KEY].as_integer(),
        Some(4)
    );
}

#[test]
fn test_toml_namespaces_are_isolated() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");

    TomlScoreStore::new(&path, "alice").set_score(7).expect("Write failed");
    TomlScoreStore::new(&path, "bob").set_score(2).expect("Write failed");

    assert_eq!(TomlScoreStore::new(&path, "alice").get_score().expect("Read"), 7);
    assert_eq!(TomlScoreStore::new(&path, "bob").get_score().expect("Read"), 2);
}

#[test]
fn test_toml_wrong_type_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "[shell_game]\nsaved_high_score = \"lots\"\n").expect("Seed failed");

    let result = TomlScoreStore::new(&path, DEFAULT_NAMESPACE).get_score();
    assert!(result.is_err(), "String score should not parse");
}

#[test]
fn test_toml_malformed_file_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "not = [valid").expect("Seed failed");

    let store = TomlScoreStore::new(&path, DEFAULT_NAMESPACE);
    assert!(store.get_score().is_err());
    assert!(store.set_score(1).is_err());
}

#[test]
fn test_sqlite_empty_reads_zero() {
    let (_db, store) = setup_sqlite(DEFAULT_NAMESPACE);
    assert_eq!(store.get_score().expect("Read failed"), 0);
    assert!(store.high_score_record().expect("Query failed").is_none());
}

#[test]
fn test_sqlite_round_trip_and_overwrite() {
    let (db, store) = setup_sqlite(DEFAULT_NAMESPACE);
    store.set_score(9).expect("Write failed");
    store.set_score(15).expect("Overwrite failed");

    let db_path = db.path().to_str().expect("Invalid path");
    let reopened = SqliteScoreStore::open(db_path, DEFAULT_NAMESPACE).expect("Reopen failed");
    assert_eq!(reopened.get_score().expect("Read failed"), 15);

    let record = reopened
        .high_score_record()
        .expect("Query failed")
        .expect("Record missing");
    assert_eq!(record.namespace(), DEFAULT_NAMESPACE);
    assert_eq!(record.name(), HIGH_SCORE_KEY);
    assert_eq!(*record.value(), 15);
}

#[test]
fn test_sqlite_namespaces_are_isolated() {
    let (db, alice) = setup_sqlite("alice");
    let db_path = db.path().to_str().expect("Invalid path");
    let bob = SqliteScoreStore::open(db_path, "bob").expect("Open failed");

    alice.set_score(11).expect("Write failed");
    assert_eq!(bob.get_score().expect("Read failed"), 0);
}

#[test]
fn test_open_store_per_backend() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let memory = open_store(&StoreSettings::new(StoreBackend::Memory, None)).expect("Memory");
    assert_eq!(memory.get_score().expect("Read failed"), 0);

    let toml_path = dir.path().join("prefs.toml");
    let prefs = open_store(&StoreSettings::new(
        StoreBackend::Toml,
        Some(toml_path.clone()),
    ))
    .expect("Toml");
    prefs.set_score(3).expect("Write failed");
    assert!(toml_path.exists());

    let db_path = dir.path().join("scores.db");
    let sqlite = open_store(&StoreSettings::new(
        StoreBackend::Sqlite,
        Some(db_path.clone()),
    ))
    .expect("Sqlite");
    sqlite.set_score(6).expect("Write failed");
    assert_eq!(sqlite.get_score().expect("Read failed"), 6);
    assert!(db_path.exists());
}

#[test]
fn test_controller_reads_score_written_by_earlier_process() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let toml_path = dir.path().join("prefs.toml");
    TomlScoreStore::new(&toml_path, DEFAULT_NAMESPACE)
        .set_score(12)
        .expect("Write failed");

    let (db, sqlite) = setup_sqlite(DEFAULT_NAMESPACE);
    sqlite.set_score(21).expect("Write failed");
    let db_path = db.path().to_str().expect("Invalid path");

    let from_toml = GameController::new(
        TomlScoreStore::new(&toml_path, DEFAULT_NAMESPACE),
        SequenceTimings::instant(),
        StdRng::seed_from_u64(1),
    );
    assert_eq!(from_toml.state().high_score(), 12);

    let from_sqlite = GameController::new(
        SqliteScoreStore::open(db_path, DEFAULT_NAMESPACE).expect("Reopen failed"),
        SequenceTimings::instant(),
        StdRng::seed_from_u64(1),
    );
    assert_eq!(from_sqlite.state().high_score(), 21);
}

#[test]
fn test_unreadable_store_counts_as_zero() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "not = [valid").expect("Seed failed");

    let controller = GameController::new(
        TomlScoreStore::new(&path, DEFAULT_NAMESPACE),
        SequenceTimings::instant(),
        StdRng::seed_from_u64(1),
    );
    assert_eq!(controller.state().high_score(), 0);
}
