//! Uniformly random play.

use crate::board::BoardState;
use crate::error::BoardError;
use crate::position::Position;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Picks one of the empty cells uniformly.
pub(super) fn select<R: Rng + ?Sized>(
    board: &BoardState,
    rng: &mut R,
) -> Result<Position, BoardError> {
    pick(&board.empty_cells().collect::<Vec<_>>(), rng)
}

/// Picks one entry of `candidates` uniformly.
pub(super) fn pick<R: Rng + ?Sized>(
    candidates: &[Position],
    rng: &mut R,
) -> Result<Position, BoardError> {
    candidates.choose(rng).copied().ok_or(BoardError::NoLegalMoves)
}
