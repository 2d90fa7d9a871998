//! Winning lines and the pure rules built on them.
//!
//! These functions read a cell array and never mutate it, so the board
//! and the heuristic strategy share them.

use crate::error::BoardError;
use crate::player::{Player, Square};
use crate::position::{CELL_COUNT, GRID_SIZE, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A row or column number, always below [`GRID_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct Lane(u8);

impl Lane {
    /// The number, `0..3`.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// One of the 8 lines that wins when uniformly occupied.
///
/// Rows and columns are built with [`Line::row`] and [`Line::column`], which
/// reject numbers off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(try_from = "RawLine", into = "RawLine")]
pub enum Line {
    /// Row `y`.
    #[display("Row({_0})")]
    Row(Lane),
    /// Column `x`.
    #[display("Column({_0})")]
    Column(Lane),
    /// `(0,0)`, `(1,1)`, `(2,2)`.
    MainDiagonal,
    /// `(2,0)`, `(1,1)`, `(0,2)`.
    AntiDiagonal,
}

impl Line {
    /// All lines, rows interleaved with columns, diagonals last.
    pub const ALL: [Line; 8] = [
        Line::Row(Lane(0)),
        Line::Column(Lane(0)),
        Line::Row(Lane(1)),
        Line::Column(Lane(1)),
        Line::Row(Lane(2)),
        Line::Column(Lane(2)),
        Line::MainDiagonal,
        Line::AntiDiagonal,
    ];

    /// Row `y`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `y` is off the grid.
    pub fn row(y: u8) -> Result<Self, BoardError> {
        if y < GRID_SIZE {
            Ok(Line::Row(Lane(y)))
        } else {
            Err(BoardError::OutOfBounds { x: 0, y })
        }
    }

    /// Column `x`.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `x` is off the grid.
    pub fn column(x: u8) -> Result<Self, BoardError> {
        if x < GRID_SIZE {
            Ok(Line::Column(Lane(x)))
        } else {
            Err(BoardError::OutOfBounds { x, y: 0 })
        }
    }

    /// The three cells of this line.
    pub fn cells(self) -> [Position; 3] {
        let at = |x: u8, y: u8| Position::ALL[(x + y * GRID_SIZE) as usize];
        match self {
            Line::Row(Lane(y)) => [at(0, y), at(1, y), at(2, y)],
            Line::Column(Lane(x)) => [at(x, 0), at(x, 1), at(x, 2)],
            Line::MainDiagonal => [at(0, 0), at(1, 1), at(2, 2)],
            Line::AntiDiagonal => [at(2, 0), at(1, 1), at(0, 2)],
        }
    }

    /// Checks whether `pos` lies on this line.
    pub fn contains(self, pos: Position) -> bool {
        self.cells().contains(&pos)
    }

    /// Returns the player occupying all three cells, if one does.
    pub fn owner(self, squares: &[Square; CELL_COUNT]) -> Option<Player> {
        let [a, b, c] = self.cells().map(|pos| squares[pos.index()]);
        match a {
            Square::Occupied(p) if a == b && a == c => Some(p),
            _ => None,
        }
    }

    /// Returns the empty cell that would complete this line for `player`.
    ///
    /// Yields a cell only when exactly one cell is empty and the other two
    /// already belong to `player`.
    pub fn finishing_cell(
        self,
        squares: &[Square; CELL_COUNT],
        player: Player,
    ) -> Option<Position> {
        let mut empty = None;
        for pos in self.cells() {
            match squares[pos.index()] {
                Square::Occupied(p) if p == player => {}
                Square::Occupied(_) => return None,
                Square::Empty if empty.is_some() => return None,
                Square::Empty => empty = Some(pos),
            }
        }
        empty
    }
}

/// Wire form of [`Line`], checked on the way in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename = "Line")]
enum RawLine {
    Row(u8),
    Column(u8),
    MainDiagonal,
    AntiDiagonal,
}

impl TryFrom<RawLine> for Line {
    type Error = BoardError;

    fn try_from(raw: RawLine) -> Result<Self, Self::Error> {
        match raw {
            RawLine::Row(y) => Line::row(y),
            RawLine::Column(x) => Line::column(x),
            RawLine::MainDiagonal => Ok(Line::MainDiagonal),
            RawLine::AntiDiagonal => Ok(Line::AntiDiagonal),
        }
    }
}

impl From<Line> for RawLine {
    fn from(line: Line) -> Self {
        match line {
            Line::Row(Lane(y)) => RawLine::Row(y),
            Line::Column(Lane(x)) => RawLine::Column(x),
            Line::MainDiagonal => RawLine::MainDiagonal,
            Line::AntiDiagonal => RawLine::AntiDiagonal,
        }
    }
}

/// Finds a uniformly occupied line.
///
/// Scans every line in [`Line::ALL`] order and reports the first match.
#[instrument(skip(squares))]
pub fn check_winner(squares: &[Square; CELL_COUNT]) -> Option<(Player, Line)> {
    Line::ALL
        .iter()
        .find_map(|&line| line.owner(squares).map(|p| (p, line)))
}

/// Checks if every cell is occupied.
pub fn is_full(squares: &[Square; CELL_COUNT]) -> bool {
    squares.iter().all(|s| !s.is_empty())
}
