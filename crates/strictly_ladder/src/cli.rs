//! Command-line interface for strictly_ladder.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Ladder - climb a ladder of tic-tac-toe opponents
#[derive(Parser, Debug)]
#[command(name = "strictly_ladder")]
#[command(
    about = "Terminal tic-tac-toe against random, heuristic and minimax opponents",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the computer, climbing the ladder
    Play {
        /// Start at this level instead of the first uncleared one
        #[arg(long, conflicts_with = "ai_level")]
        level_id: Option<u32>,

        /// Play a single unranked game at this strategy level (0, 1 or 2)
        #[arg(long)]
        ai_level: Option<i64>,

        /// Whether you move first
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        self_first: bool,

        /// Path to the ladder config
        #[arg(short, long, default_value = "ladder.toml")]
        config: PathBuf,
    },

    /// Play computer against computer and print a tally
    Simulate {
        /// Strategy level for X
        #[arg(long)]
        x_level: i64,

        /// Strategy level for O
        #[arg(long)]
        o_level: i64,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for reproducible runs
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// List the ladder levels and features
    Levels {
        /// Path to the ladder config
        #[arg(short, long, default_value = "ladder.toml")]
        config: PathBuf,
    },
}
