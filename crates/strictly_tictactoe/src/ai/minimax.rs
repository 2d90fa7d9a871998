//! Exhaustive minimax.
//!
//! Scores are always from the board's self player's side: +1 win, -1 loss,
//! 0 tie. Levels where the self player moves maximize, the others minimize.
//! The search explores a scratch clone with place/retract pairs; every
//! placement is held by a [`Placed`] guard that retracts it on drop, so the
//! scratch board is restored on every exit path.

use crate::board::{BoardState, GameResult};
use crate::error::BoardError;
use crate::player::Square;
use crate::position::{CELL_COUNT, Position};
use derive_getters::Getters;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Root result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct Evaluation {
    /// Best worst-case score for the self player.
    score: i8,
    /// The first move in index order achieving `score`; `None` on a
    /// terminal board.
    best_move: Option<Position>,
}

/// Scores already computed for a cell layout.
///
/// Whose turn it is follows from the number of marks, so the layout alone
/// keys the score.
type Cache = HashMap<[Square; CELL_COUNT], i8>;

/// A move placed on the scratch board; retracted when dropped.
struct Placed<'a> {
    board: &'a mut BoardState,
}

impl<'a> Placed<'a> {
    fn new(board: &'a mut BoardState, pos: Position) -> Result<Self, BoardError> {
        board.place(pos)?;
        Ok(Self { board })
    }
}

impl Deref for Placed<'_> {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut BoardState {
        self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        let retracted = self.board.retract();
        debug_assert!(retracted.is_ok(), "guarded move vanished from history");
    }
}

/// Searches the full game tree below `board`.
///
/// On a terminal board returns its score with no move.
///
/// # Errors
///
/// Only if the search's own bookkeeping breaks, which surfaces as an
/// `IllegalMove`.
#[instrument(skip(board), fields(moves = board.move_count()))]
pub fn evaluate(board: &BoardState) -> Result<Evaluation, BoardError> {
    let mut scratch = board.clone();
    let maximizing = scratch.is_self_turn();
    let mut cache = Cache::new();

    if let Some(score) = terminal_score(scratch.result()) {
        return Ok(Evaluation {
            score,
            best_move: None,
        });
    }

    let candidates: Vec<Position> = scratch.empty_cells().collect();
    let mut best = Evaluation {
        score: if maximizing { i8::MIN } else { i8::MAX },
        best_move: None,
    };
    for pos in candidates {
        let score = {
            let mut placed = Placed::new(&mut scratch, pos)?;
            search(&mut placed, !maximizing, &mut cache)?
        };
        if improves(score, best.score, maximizing) {
            best = Evaluation {
                score,
                best_move: Some(pos),
            };
        }
    }

    debug_assert_eq!(&scratch, board);
    debug!(score = best.score, best_move = ?best.best_move, nodes = cache.len(), "Search complete");
    Ok(best)
}

/// Chooses the best move for the side to move.
pub(super) fn select(board: &BoardState) -> Result<Position, BoardError> {
    evaluate(board)?.best_move.ok_or(BoardError::NoLegalMoves)
}

fn search(board: &mut BoardState, maximizing: bool, cache: &mut Cache) -> Result<i8, BoardError> {
    if let Some(score) = terminal_score(board.result()) {
        return Ok(score);
    }
    debug_assert_eq!(maximizing, board.is_self_turn());

    let key = *board.squares();
    if let Some(&score) = cache.get(&key) {
        return Ok(score);
    }

    let candidates: Vec<Position> = board.empty_cells().collect();
    let mut best = if maximizing { i8::MIN } else { i8::MAX };
    for pos in candidates {
        let mut placed = Placed::new(board, pos)?;
        let score = search(&mut placed, !maximizing, cache)?;
        if improves(score, best, maximizing) {
            best = score;
        }
    }

    cache.insert(key, best);
    Ok(best)
}

fn terminal_score(result: GameResult) -> Option<i8> {
    match result {
        GameResult::Win => Some(1),
        GameResult::Lose => Some(-1),
        GameResult::Tie => Some(0),
        GameResult::InProgress => None,
    }
}

/// Strict comparison: a later candidate never displaces an equal one.
fn improves(score: i8, best: i8, maximizing: bool) -> bool {
    if maximizing { score > best } else { score < best }
}
