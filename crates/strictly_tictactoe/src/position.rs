//! Cell coordinates on the 3x3 grid.

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::instrument;

/// Width and height of the grid.
pub const GRID_SIZE: u8 = 3;

/// Number of cells on the grid.
pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// A cell coordinate `(x, y)`, both in `0..3`.
///
/// `x` is the column and `y` the row. Positions order row-major: by `y`,
/// then by `x`, which is the same as ordering by [`Position::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// All 9 positions in ascending index order.
    pub const ALL: [Position; CELL_COUNT] = [
        Position { x: 0, y: 0 },
        Position { x: 1, y: 0 },
        Position { x: 2, y: 0 },
        Position { x: 0, y: 1 },
        Position { x: 1, y: 1 },
        Position { x: 2, y: 1 },
        Position { x: 0, y: 2 },
        Position { x: 1, y: 2 },
        Position { x: 2, y: 2 },
    ];

    /// The center cell.
    pub const CENTER: Position = Position { x: 1, y: 1 };

    /// Creates a position, checking bounds.
    pub fn new(x: u8, y: u8) -> Result<Self, BoardError> {
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return Err(BoardError::OutOfBounds { x, y });
        }
        Ok(Self { x, y })
    }

    /// Column, `0..3`.
    pub fn x(self) -> u8 {
        self.x
    }

    /// Row, `0..3`.
    pub fn y(self) -> u8 {
        self.y
    }

    /// Linear storage index `x + y * 3`.
    pub fn index(self) -> usize {
        (self.x + self.y * GRID_SIZE) as usize
    }

    /// Inverse of [`Position::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self.index() {
            0 => "Top-left",
            1 => "Top-center",
            2 => "Top-right",
            3 => "Middle-left",
            4 => "Center",
            5 => "Middle-right",
            6 => "Bottom-left",
            7 => "Bottom-center",
            _ => "Bottom-right",
        }
    }

    /// Parses a keypad number (1-9), an `x,y` pair, or a label.
    ///
    /// Labels match case-insensitively; a unique prefix such as `"bottom-r"`
    /// is enough.
    #[instrument]
    pub fn parse(s: &str) -> Option<Position> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }

        if let Some((x, y)) = s.split_once(',') {
            let x = x.trim().parse().ok()?;
            let y = y.trim().parse().ok()?;
            return Self::new(x, y).ok();
        }

        let s_lower = s.to_lowercase();
        if let Some(exact) = Self::ALL
            .iter()
            .copied()
            .find(|pos| pos.label().to_lowercase() == s_lower)
        {
            return Some(exact);
        }

        let mut prefixed = Self::ALL
            .iter()
            .copied()
            .filter(|pos| pos.label().to_lowercase().starts_with(&s_lower));
        match (prefixed.next(), prefixed.next()) {
            (Some(pos), None) => Some(pos),
            _ => None,
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = BoardError;

    fn try_from((x, y): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl From<Position> for (u8, u8) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), Some(*pos));
        }
        assert_eq!(Position::from_index(CELL_COUNT), None);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        assert_eq!(
            Position::new(3, 0),
            Err(BoardError::OutOfBounds { x: 3, y: 0 })
        );
        assert!(Position::new(0, 7).is_err());
    }

    #[test]
    fn test_ordering_is_row_major() {
        let a = Position::new(2, 0).unwrap();
        let b = Position::new(0, 1).unwrap();
        assert!(a < b);
        let mut all = Position::ALL;
        all.reverse();
        all.sort();
        assert_eq!(all, Position::ALL);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(Position::parse("1"), Position::from_index(0));
        assert_eq!(Position::parse(" 9 "), Position::from_index(8));
        assert_eq!(Position::parse("0"), None);
        assert_eq!(Position::parse("10"), None);
        assert_eq!(Position::parse("2, 1"), Position::new(2, 1).ok());
        assert_eq!(Position::parse("3,1"), None);
        assert_eq!(Position::parse("center"), Some(Position::CENTER));
        assert_eq!(Position::parse("Bottom-r"), Position::from_index(8));
        // Ambiguous prefix
        assert_eq!(Position::parse("top"), None);
        assert_eq!(Position::parse(""), None);
    }
}
