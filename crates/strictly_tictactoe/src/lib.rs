//! Strictly tic-tac-toe - board state machine and move-search engine
//!
//! A 3x3 game played against a computer opponent of selectable strength.
//!
//! # Architecture
//!
//! - **Primitives**: [`Position`], [`Player`], [`Square`]
//! - **Lines**: the 8 winning lines and pure win/full checks
//! - **Board**: [`BoardState`] owns all mutation (`place`/`retract`) and the
//!   terminal result, oriented from a "self" player's side
//! - **AI**: [`Ai`] random, attack-or-block, and exhaustive minimax
//! - **Progress**: [`Tally`] and unlock/pass rules over finished games
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Ai, BoardState, Player};
//!
//! # fn main() -> Result<(), strictly_tictactoe::BoardError> {
//! let mut board = BoardState::new(Player::X, true);
//! board.place(strictly_tictactoe::Position::CENTER)?;
//!
//! let reply = Ai::from_level(2).select_move(&board, &mut rand::rng())?;
//! board.place(reply)?;
//! assert_eq!(board.move_count(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ai;
mod board;
mod error;
mod line;
mod player;
mod position;
mod progress;

pub use ai::{Ai, Evaluation, evaluate};
pub use board::{BoardState, GameResult};
pub use error::{BoardError, IllegalMoveReason};
pub use line::{Lane, Line, check_winner, is_full};
pub use player::{Player, Square};
pub use position::{CELL_COUNT, GRID_SIZE, Position};
pub use progress::{PassCondition, Tally, UnlockKind, UnlockRule};
