//! Strictly Ladder - tic-tac-toe against a ladder of computer opponents.
//!
//! The binary drives games through an [`Orchestrator`] that asks each
//! [`Player`] for a [`Turn`] and reports [`GameEvent`]s to a renderer. Results
//! feed a [`Ladder`] built from a [`LadderConfig`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod ladder;
mod orchestrator;
mod players;
mod simulate;

pub use config::{ConfigError, FeatureConfig, LadderConfig, LevelConfig};
pub use ladder::{Ladder, LadderReport};
pub use orchestrator::{GameEvent, MatchOutcome, Orchestrator};
pub use players::{ComputerPlayer, HumanPlayer, Player, Turn};
pub use simulate::{Matchup, simulate};
