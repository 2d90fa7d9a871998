//! Game orchestration between players.

use crate::players::{Player, Turn};
use anyhow::{Context, Result};
use strictly_tictactoe::{BoardState, GameResult, Line, Player as Mark, Position};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Board changed; carries the rendered board.
    StateChanged(String),
    /// A computer player is choosing.
    Thinking {
        /// Who is thinking.
        player: String,
    },
    /// Move was made.
    MoveMade {
        /// Who moved.
        player: String,
        /// Their mark.
        mark: Mark,
        /// Where.
        position: Position,
    },
    /// Moves were taken back.
    Undone {
        /// Plies retracted.
        plies: usize,
    },
    /// An undo request could not be honoured.
    UndoRejected,
    /// Game ended.
    GameOver {
        /// Result for the board's self player.
        result: GameResult,
        /// Winner's name, if a line was completed.
        winner: Option<String>,
        /// The completed line.
        line: Option<Line>,
    },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The board reached a terminal result.
    Finished(GameResult),
    /// A player quit.
    Abandoned,
}

/// Orchestrates gameplay between two players.
pub struct Orchestrator {
    board: BoardState,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    pub fn new(
        board: BoardState,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            board,
            player_x,
            player_o,
            event_tx,
        }
    }

    /// The live board.
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    fn player(&mut self, mark: Mark) -> &mut Box<dyn Player> {
        match mark {
            Mark::X => &mut self.player_x,
            Mark::O => &mut self.player_o,
        }
    }

    /// Hands back the players as `(x, o)`, closing the event channel.
    pub fn into_players(self) -> (Box<dyn Player>, Box<dyn Player>) {
        (self.player_x, self.player_o)
    }

    /// Starts over on `board`, keeping the players.
    pub fn restart(&mut self, board: BoardState) {
        self.board = board;
    }

    /// Runs the game loop until the board is terminal or a player quits.
    #[instrument(skip(self), fields(first = %self.board.first_player()))]
    pub async fn run(&mut self) -> Result<MatchOutcome> {
        info!("Starting game orchestration");
        self.event_tx.send(GameEvent::StateChanged(self.board.display()))?;

        while !self.board.is_terminal() {
            let mark = self.board.current_player();
            let name = self.player(mark).name().to_string();

            if self.player(mark).is_computer() {
                self.event_tx.send(GameEvent::Thinking {
                    player: name.clone(),
                })?;
            }

            debug!(player = %name, %mark, "Waiting for move");
            let board = self.board.clone();
            let turn = self.player(mark).get_move(&board).await?;

            match turn {
                Turn::Place(position) => {
                    self.board
                        .place(position)
                        .with_context(|| format!("{} played an illegal move", name))?;
                    self.event_tx.send(GameEvent::MoveMade {
                        player: name,
                        mark,
                        position,
                    })?;
                }
                Turn::Undo => {
                    // Back to this player's previous turn: their move and the reply.
                    if self.board.move_count() < 2 {
                        warn!(player = %name, "Nothing to undo");
                        self.event_tx.send(GameEvent::UndoRejected)?;
                        continue;
                    }
                    self.board.retract()?;
                    self.board.retract()?;
                    self.event_tx.send(GameEvent::Undone { plies: 2 })?;
                }
                Turn::Quit => {
                    info!(player = %name, "Player quit");
                    return Ok(MatchOutcome::Abandoned);
                }
            }

            self.event_tx.send(GameEvent::StateChanged(self.board.display()))?;
        }

        let result = self.board.result();
        let winner = match self.board.winner() {
            Some(mark) => Some(self.player(mark).name().to_string()),
            None => None,
        };
        info!(%result, winner = ?winner, "Game over");
        self.event_tx.send(GameEvent::GameOver {
            result,
            winner,
            line: self.board.winning_line(),
        })?;

        Ok(MatchOutcome::Finished(result))
    }
}
