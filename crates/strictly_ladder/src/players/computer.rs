//! Computer player backed by a strategy.

use super::{Player, Turn};
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use strictly_tictactoe::{Ai, BoardState};
use tracing::{debug, instrument};

/// Plays moves chosen by an [`Ai`] strategy.
///
/// The search runs on the blocking pool against a clone of the board, so
/// the caller's board stays readable while the move is chosen.
pub struct ComputerPlayer {
    name: String,
    ai: Ai,
    rng: ChaCha8Rng,
    think_delay: Duration,
}

impl ComputerPlayer {
    /// Creates a computer player seeded from the OS.
    pub fn new(name: impl Into<String>, ai: Ai) -> Self {
        Self::with_rng(name, ai, ChaCha8Rng::from_os_rng())
    }

    /// Creates a computer player with a fixed seed.
    pub fn seeded(name: impl Into<String>, ai: Ai, seed: u64) -> Self {
        Self::with_rng(name, ai, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(name: impl Into<String>, ai: Ai, rng: ChaCha8Rng) -> Self {
        Self {
            name: name.into(),
            ai,
            rng,
            think_delay: Duration::ZERO,
        }
    }

    /// Sets a pause before each move.
    pub fn with_think_delay(mut self, delay: Duration) -> Self {
        self.think_delay = delay;
        self
    }
}

#[async_trait]
impl Player for ComputerPlayer {
    #[instrument(skip(self, board), fields(ai = %self.ai, name = %self.name))]
    async fn get_move(&mut self, board: &BoardState) -> Result<Turn> {
        if !self.think_delay.is_zero() {
            tokio::time::sleep(self.think_delay).await;
        }

        let ai = self.ai;
        let snapshot = board.clone();
        let seed: u64 = self.rng.random();
        let position = tokio::task::spawn_blocking(move || {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            ai.select_move(&snapshot, &mut rng)
        })
        .await
        .context("Strategy task panicked")??;

        debug!(%position, "Computer chose position");
        Ok(Turn::Place(position))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}
