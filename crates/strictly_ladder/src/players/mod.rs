//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::HumanPlayer;

use anyhow::Result;
use async_trait::async_trait;
use strictly_tictactoe::{BoardState, Position};

/// What a player wants to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Place a mark.
    Place(Position),
    /// Take back the last exchange.
    Undo,
    /// Abandon the game.
    Quit,
}

/// Trait for players that can make moves.
#[async_trait]
pub trait Player: Send {
    /// Decides this player's turn on `board`.
    ///
    /// Only called when the game is not over and it is this player's turn.
    async fn get_move(&mut self, board: &BoardState) -> Result<Turn>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Whether the orchestrator should announce that this player is thinking.
    fn is_computer(&self) -> bool {
        false
    }
}
