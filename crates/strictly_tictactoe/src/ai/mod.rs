//! Computer opponents.
//!
//! Each strategy is a pure policy over a [`BoardState`]: it reads the board
//! (minimax explores a private clone of it) and returns one legal position.
//! Randomness is injected by the caller so games can be replayed from a seed.

mod heuristic;
mod minimax;
mod random;

pub use minimax::{Evaluation, evaluate};

use crate::board::BoardState;
use crate::error::BoardError;
use crate::position::Position;
use rand::Rng;
use tracing::{debug, instrument};

/// The strategy family, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Ai {
    /// Uniformly random empty cell.
    Random,
    /// Win now if possible, else block, else random.
    Heuristic,
    /// Exhaustive minimax with first-found tie-break.
    Minimax,
}

impl Ai {
    /// Maps a difficulty level to a strategy.
    ///
    /// 0 is random, 1 is heuristic, any other level is minimax.
    #[instrument]
    pub fn from_level(level: i64) -> Self {
        match level {
            0 => Ai::Random,
            1 => Ai::Heuristic,
            _ => Ai::Minimax,
        }
    }

    /// The canonical difficulty level for this strategy.
    pub fn level(self) -> i64 {
        match self {
            Ai::Random => 0,
            Ai::Heuristic => 1,
            Ai::Minimax => 2,
        }
    }

    /// Chooses a move for the player whose turn it is.
    ///
    /// The board is not modified.
    ///
    /// # Errors
    ///
    /// `NoLegalMoves` if the board is terminal.
    #[instrument(skip(board, rng), fields(strategy = %self, to_move = %board.current_player()))]
    pub fn select_move<R: Rng + ?Sized>(
        &self,
        board: &BoardState,
        rng: &mut R,
    ) -> Result<Position, BoardError> {
        if board.is_terminal() {
            return Err(BoardError::NoLegalMoves);
        }

        let pos = match self {
            Ai::Random => random::select(board, rng)?,
            Ai::Heuristic => heuristic::select(board, rng)?,
            Ai::Minimax => minimax::select(board)?,
        };

        debug!(%pos, "Strategy chose move");
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_level_mapping() {
        assert_eq!(Ai::from_level(0), Ai::Random);
        assert_eq!(Ai::from_level(1), Ai::Heuristic);
        assert_eq!(Ai::from_level(2), Ai::Minimax);
        assert_eq!(Ai::from_level(7), Ai::Minimax);
        assert_eq!(Ai::from_level(-1), Ai::Minimax);
        for ai in Ai::iter() {
            assert_eq!(Ai::from_level(ai.level()), ai);
        }
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let moves = [0, 3, 1, 4, 2].map(|i| Position::from_index(i).unwrap());
        let board = BoardState::replay(Player::X, true, &moves).unwrap();
        assert!(board.is_terminal());

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for ai in Ai::iter() {
            assert_eq!(
                ai.select_move(&board, &mut rng),
                Err(BoardError::NoLegalMoves)
            );
        }
    }

    #[test]
    fn test_select_move_leaves_board_untouched() {
        let mut board = BoardState::new(Player::O, false);
        board.place(Position::CENTER).unwrap();
        let before = board.clone();

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for ai in Ai::iter() {
            let pos = ai.select_move(&board, &mut rng).unwrap();
            assert!(board.get_cell(pos).is_empty());
            assert_eq!(board, before);
        }
    }
}
