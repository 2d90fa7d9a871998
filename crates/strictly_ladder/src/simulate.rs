//! Computer-versus-computer runs.

use crate::orchestrator::{MatchOutcome, Orchestrator};
use crate::players::ComputerPlayer;
use anyhow::{Result, bail};
use derive_getters::Getters;
use derive_new::new;
use strictly_tictactoe::{Ai, BoardState, Player as Mark, Tally};
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Two strategies and how many games to play between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct Matchup {
    /// Strategy playing X.
    x: Ai,
    /// Strategy playing O.
    o: Ai,
    /// Games to play.
    games: u32,
    /// Seed for both players.
    seed: u64,
}

/// Plays the matchup and tallies results from X's side.
///
/// X moves first in even-numbered games and O in odd ones.
#[instrument]
pub async fn simulate(matchup: Matchup) -> Result<Tally> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let sink = tokio::spawn(async move { while event_rx.recv().await.is_some() {} });

    let x = ComputerPlayer::seeded("X", matchup.x, matchup.seed);
    let o = ComputerPlayer::seeded("O", matchup.o, matchup.seed.wrapping_add(1));
    let mut orchestrator = Orchestrator::new(
        BoardState::new(Mark::X, true),
        Box::new(x),
        Box::new(o),
        event_tx,
    );

    let mut tally = Tally::new();
    for game in 0..matchup.games {
        orchestrator.restart(BoardState::new(Mark::X, game % 2 == 0));
        match orchestrator.run().await? {
            MatchOutcome::Finished(result) => tally.record(result),
            MatchOutcome::Abandoned => bail!("Game {} was abandoned", game),
        }
    }

    drop(orchestrator);
    sink.await?;
    info!(?tally, "Simulation complete");
    Ok(tally)
}
