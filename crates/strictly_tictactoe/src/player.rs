//! Player identities and cell occupancy.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};

/// One of the two opposing sides.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Player {
    /// Player X.
    X,
    /// Player O.
    O,
}

impl Player {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the board: empty or holding one player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// No mark.
    #[default]
    Empty,
    /// Marked by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the player holding this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(p) => Some(p),
        }
    }

    /// Checks if the cell is unmarked.
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }

    /// Returns the opponent of the player holding this cell.
    ///
    /// # Errors
    ///
    /// `BoardError::UndefinedOpponent` if the cell is empty. Reaching this
    /// means a caller read a cell as a player without checking emptiness.
    pub fn opponent(self) -> Result<Player, BoardError> {
        self.player()
            .map(Player::opponent)
            .ok_or(BoardError::UndefinedOpponent)
    }
}

impl From<Player> for Square {
    fn from(player: Player) -> Self {
        Square::Occupied(player)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Square::Empty => write!(f, " "),
            Square::Occupied(p) => write!(f, "{}", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involutive() {
        for p in [Player::X, Player::O] {
            assert_ne!(p.opponent(), p);
            assert_eq!(p.opponent().opponent(), p);
        }
    }

    #[test]
    fn test_empty_square_has_no_opponent() {
        assert_eq!(Square::Empty.opponent(), Err(BoardError::UndefinedOpponent));
        assert_eq!(Square::Occupied(Player::X).opponent(), Ok(Player::O));
    }
}
