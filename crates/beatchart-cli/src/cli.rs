//! CLI argument definitions for beatchart.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "beatchart")]
#[command(about = "Rhythm-game chart generator and timing judge", version)]
pub struct Args {
    /// Directory holding generated charts
    #[arg(long, global = true, env = "BEATCHART_STORE", default_value = "charts")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a chart from an audio features file and store it
    Generate {
        /// Audio features (JSON)
        #[arg(short, long, value_name = "FILE")]
        features: PathBuf,
        /// Difficulty: easy, normal or hard
        #[arg(short, long, default_value = "normal")]
        difficulty: String,
        /// Random seed (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Session id to store the chart under (timestamp if omitted)
        #[arg(long)]
        session: Option<String>,
        /// Generator config overrides (TOML)
        #[arg(long, value_name = "FILE", env = "BEATCHART_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Show a stored chart
    Show {
        #[arg(long)]
        session: String,
        /// Print the chart as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay recorded lane presses against a stored chart
    Play {
        #[arg(long)]
        session: String,
        /// Lane presses (JSON list of {"lane", "time"})
        #[arg(long, value_name = "FILE")]
        hits: PathBuf,
        /// Directory to write the result file into
        #[arg(long, value_name = "DIR")]
        results: Option<PathBuf>,
    },
    /// Delete a stored chart
    Delete {
        #[arg(long)]
        session: String,
    },
}
