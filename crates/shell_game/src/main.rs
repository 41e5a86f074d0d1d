//! Shell Game - terminal shell game with a persisted high score.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use shell_game::{
    GameConfig, GameController, GameSession, ScoreStore, SequenceTimings, open_store, tui,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Play { fast } => run_play(config, fast).await,
        Command::HighScore { json } => run_high_score(config, json),
    }
}

/// Loads the config file and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    if let Some(backend) = cli.backend {
        config = config.with_backend(backend);
    }
    if let Some(path) = &cli.store_path {
        config = config.with_store_path(path.clone());
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Run the terminal game
async fn run_play(config: GameConfig, fast: bool) -> Result<()> {
    // Log to a file so output does not tear the terminal UI
    let log_file =
        std::fs::File::create("shell_game.log").context("Failed to create shell_game.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(fast, backend = %config.store().backend(), "Starting shell game");

    let store = open_store(config.store()).context("Failed to open score store")?;
    let timings = if fast {
        SequenceTimings::instant()
    } else {
        *config.timings()
    };

    let controller = GameController::new(store, timings, config.rng());
    let mut session = GameSession::spawn(controller);

    tui::run_tui(&mut session).await
}

/// Print the stored high score
#[instrument(skip(config))]
fn run_high_score(config: GameConfig, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let store = open_store(config.store()).context("Failed to open score store")?;
    let high_score = store.get_score().context("Failed to read high score")?;
    info!(high_score, "Read high score");

    if json {
        println!("{}", serde_json::json!({ "high_score": high_score }));
    } else {
        println!("{}", high_score);
    }
    Ok(())
}
