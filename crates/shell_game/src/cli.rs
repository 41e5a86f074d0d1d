//! Command-line interface for shell_game.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shell_game::StoreBackend;

/// Shell Game - find the ball under the cups
#[derive(Parser, Debug)]
#[command(name = "shell_game")]
#[command(about = "Stake balls, watch the shuffle, find the ball", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "shell_game.toml")]
    pub config: PathBuf,

    /// Override the high score file
    #[arg(long, global = true)]
    pub store_path: Option<PathBuf>,

    /// Override the high score backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<StoreBackend>,

    /// Fix the shuffle RNG seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Skip the reveal and shuffle delays
        #[arg(long)]
        fast: bool,
    },

    /// Print the stored high score
    HighScore {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}
