//! Attack-or-block play: finish a line, else stop the opponent finishing one.

use super::random;
use crate::board::BoardState;
use crate::error::BoardError;
use crate::position::Position;
use rand::Rng;
use tracing::trace;

/// Takes a finishing cell for the mover, else one that blocks the
/// opponent, else any empty cell.
///
/// The pick among finishing cells is weighted per line: a cell that
/// completes two lines is listed twice and so is twice as likely.
pub(super) fn select<R: Rng + ?Sized>(
    board: &BoardState,
    rng: &mut R,
) -> Result<Position, BoardError> {
    let me = board.current_player();

    let wins: Vec<_> = board.candidate_finishing_cells(me).collect();
    if !wins.is_empty() {
        trace!(count = wins.len(), "Taking a winning cell");
        return random::pick(&wins, rng);
    }

    let blocks: Vec<_> = board.candidate_finishing_cells(me.opponent()).collect();
    if !blocks.is_empty() {
        trace!(count = blocks.len(), "Blocking opponent");
        return random::pick(&blocks, rng);
    }

    random::select(board, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GameResult;
    use crate::player::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn board_from(indices: &[usize]) -> BoardState {
        let moves: Vec<_> = indices.iter().map(|&i| Position::from_index(i).unwrap()).collect();
        BoardState::replay(Player::X, true, &moves).unwrap()
    }

    #[test]
    fn test_prefers_win_over_block() {
        // X: 0, 1; O: 3, 4. X to move can win at 2 or block at 5.
        let board = board_from(&[0, 3, 1, 4]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(select(&board, &mut rng).unwrap(), Position::from_index(2).unwrap());
        }
    }

    #[test]
    fn test_blocks_when_no_win() {
        // X: 0, 8; O: 4, 1. X to move, O threatens 7.
        let board = board_from(&[0, 4, 8, 1]);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(board.candidate_finishing_cells(Player::X).count(), 0);
        for _ in 0..20 {
            assert_eq!(select(&board, &mut rng).unwrap(), Position::from_index(7).unwrap());
        }
    }

    #[test]
    fn test_chosen_win_ends_game() {
        let mut board = board_from(&[0, 3, 1, 4]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let pos = select(&board, &mut rng).unwrap();
        board.place(pos).unwrap();
        assert_eq!(board.result(), GameResult::Win);
    }
}
