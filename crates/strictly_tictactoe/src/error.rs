//! Board error types.

use crate::position::Position;
use derive_more::{Display, Error};

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalMoveReason {
    /// The cell already holds a mark.
    #[display("cell is occupied")]
    Occupied,
    /// The game has already ended.
    #[display("game is over")]
    GameOver,
}

/// Errors raised by board mutation and move selection.
///
/// Every variant signals a logic error in the caller. Nothing here is
/// transient, so none of them is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// `place` on an occupied cell or a finished board.
    #[display("Illegal move at {position}: {reason}")]
    IllegalMove {
        /// Where the mark was to go.
        position: Position,
        /// What made it illegal.
        reason: IllegalMoveReason,
    },

    /// `retract` with no moves played.
    #[display("No moves to retract")]
    EmptyHistory,

    /// The opponent of an empty cell was requested.
    #[display("Empty cell has no opponent")]
    UndefinedOpponent,

    /// A coordinate outside the 3x3 grid.
    #[display("Position ({x}, {y}) is out of bounds")]
    OutOfBounds {
        /// Column.
        x: u8,
        /// Row.
        y: u8,
    },

    /// A strategy was asked to move on a board that admits no move.
    #[display("No legal moves available")]
    NoLegalMoves,
}
