//! The authoritative game state.

use crate::error::{BoardError, IllegalMoveReason};
use crate::line::{self, Line};
use crate::player::{Player, Square};
use crate::position::{CELL_COUNT, GRID_SIZE, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of a game, oriented from the self player's side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum GameResult {
    /// Moves remain.
    #[default]
    InProgress,
    /// The self player completed a line.
    Win,
    /// The board filled with no line.
    Tie,
    /// The opponent completed a line.
    Lose,
}

impl GameResult {
    /// Checks if the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

/// Board cells, move history, and the derived result.
///
/// `history` is the single source of truth for whose turn it is. The result
/// and winning line are recomputed from the cells after every `place` and
/// `retract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord", into = "BoardRecord")]
pub struct BoardState {
    squares: [Square; CELL_COUNT],
    history: Vec<Position>,
    first_player: Player,
    self_player: Player,
    result: GameResult,
    winning_line: Option<Line>,
}

impl BoardState {
    /// Creates an empty board.
    ///
    /// `self_player` is the side results are reported for; it moves first
    /// when `self_moves_first` is set, otherwise its opponent does.
    #[instrument]
    pub fn new(self_player: Player, self_moves_first: bool) -> Self {
        let first_player = if self_moves_first {
            self_player
        } else {
            self_player.opponent()
        };
        Self {
            squares: [Square::Empty; CELL_COUNT],
            history: Vec::with_capacity(CELL_COUNT),
            first_player,
            self_player,
            result: GameResult::InProgress,
            winning_line: None,
        }
    }

    /// Builds a board by playing `moves` in order from an empty board.
    ///
    /// # Errors
    ///
    /// The first `IllegalMove` any of the moves raises.
    #[instrument]
    pub fn replay(
        self_player: Player,
        self_moves_first: bool,
        moves: &[Position],
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(self_player, self_moves_first);
        for &pos in moves {
            board.place(pos)?;
        }
        Ok(board)
    }

    /// Marks `pos` for the current player.
    ///
    /// # Errors
    ///
    /// `IllegalMove` if the game is over or the cell is occupied. The board
    /// is left untouched in both cases.
    #[instrument(skip(self), fields(player = %self.current_player()))]
    pub fn place(&mut self, pos: Position) -> Result<(), BoardError> {
        if self.is_terminal() {
            return Err(BoardError::IllegalMove {
                position: pos,
                reason: IllegalMoveReason::GameOver,
            });
        }
        if !self.squares[pos.index()].is_empty() {
            return Err(BoardError::IllegalMove {
                position: pos,
                reason: IllegalMoveReason::Occupied,
            });
        }

        let player = self.current_player();
        self.squares[pos.index()] = Square::Occupied(player);
        self.history.push(pos);
        self.evaluate();

        debug!(%pos, %player, result = %self.result, "Placed mark");
        Ok(())
    }

    /// Undoes the last move and returns its position.
    ///
    /// # Errors
    ///
    /// `EmptyHistory` if no move has been played.
    #[instrument(skip(self))]
    pub fn retract(&mut self) -> Result<Position, BoardError> {
        let pos = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        self.squares[pos.index()] = Square::Empty;
        self.evaluate();

        debug!(%pos, "Retracted mark");
        Ok(pos)
    }

    /// Recomputes the result and winning line from the cells.
    fn evaluate(&mut self) {
        (self.result, self.winning_line) = match line::check_winner(&self.squares) {
            Some((player, line)) if player == self.self_player => (GameResult::Win, Some(line)),
            Some((_, line)) => (GameResult::Lose, Some(line)),
            None if line::is_full(&self.squares) => (GameResult::Tie, None),
            None => (GameResult::InProgress, None),
        };
    }

    /// The player to move: the first player on even history lengths.
    pub fn current_player(&self) -> Player {
        if self.history.len() % 2 == 0 {
            self.first_player
        } else {
            self.first_player.opponent()
        }
    }

    /// Checks if it is the self player's turn.
    pub fn is_self_turn(&self) -> bool {
        self.current_player() == self.self_player
    }

    /// Checks if the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// The cached result.
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// The line that ended the game, if one did.
    pub fn winning_line(&self) -> Option<Line> {
        self.winning_line
    }

    /// The player who completed a line, if any.
    pub fn winner(&self) -> Option<Player> {
        match self.result {
            GameResult::Win => Some(self.self_player),
            GameResult::Lose => Some(self.self_player.opponent()),
            GameResult::Tie | GameResult::InProgress => None,
        }
    }

    /// The cell at `pos`.
    pub fn get_cell(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// All cells in index order.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Positions played so far, oldest first.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Number of moves played.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// The side that moved first.
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// The side results are reported for.
    pub fn self_player(&self) -> Player {
        self.self_player
    }

    /// Unoccupied positions in ascending index order.
    ///
    /// The iterator borrows the board and can be cloned to restart.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + Clone + '_ {
        Position::ALL
            .iter()
            .copied()
            .filter(move |pos| self.squares[pos.index()].is_empty())
    }

    /// Cells where `player` would complete a line with one more mark.
    ///
    /// One entry per qualifying line, in [`Line::ALL`] order, so a cell that
    /// finishes two lines appears twice.
    pub fn candidate_finishing_cells(
        &self,
        player: Player,
    ) -> impl Iterator<Item = Position> + Clone + '_ {
        Line::ALL
            .iter()
            .filter_map(move |line| line.finishing_cell(&self.squares, player))
    }

    /// Formats the board with keypad numbers (1-9) on empty cells.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let pos = Position::ALL[(x + y * GRID_SIZE) as usize];
                let symbol = match self.get_cell(pos) {
                    Square::Empty => (pos.index() + 1).to_string(),
                    Square::Occupied(p) => p.to_string(),
                };
                result.push_str(&symbol);
                if x < GRID_SIZE - 1 {
                    result.push('|');
                }
            }
            if y < GRID_SIZE - 1 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Serialized form of a board: who plays which side, and the moves.
///
/// Cells and result are derived on load by replaying the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardRecord {
    self_player: Player,
    first_player: Player,
    history: Vec<Position>,
}

impl TryFrom<BoardRecord> for BoardState {
    type Error = BoardError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        Self::replay(
            record.self_player,
            record.first_player == record.self_player,
            &record.history,
        )
    }
}

impl From<BoardState> for BoardRecord {
    fn from(board: BoardState) -> Self {
        Self {
            self_player: board.self_player,
            first_player: board.first_player,
            history: board.history,
        }
    }
}
