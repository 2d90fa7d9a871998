//! Human player reading moves from a line-oriented input.

use super::{Player, Turn};
use anyhow::{Result, bail};
use async_trait::async_trait;
use strictly_tictactoe::{BoardState, Position};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{instrument, warn};

/// Human player that types moves.
///
/// Accepts a keypad number (1-9), `x,y`, a cell label, `undo`, or `quit`.
pub struct HumanPlayer<R, W> {
    name: String,
    lines: Lines<R>,
    out: W,
}

impl<R, W> HumanPlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Creates a human player over `input`, prompting on `out`.
    pub fn new(name: impl Into<String>, input: R, out: W) -> Self {
        Self {
            name: name.into(),
            lines: input.lines(),
            out,
        }
    }

    async fn prompt(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

impl HumanPlayer<tokio::io::BufReader<tokio::io::Stdin>, tokio::io::Stdout> {
    /// Creates a human player on the terminal.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(
            name,
            tokio::io::BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
        )
    }
}

/// Parses one line of input against `board`.
///
/// Returns the reason as an error string when the line is not a usable turn.
pub fn parse_turn(line: &str, board: &BoardState) -> Result<Turn, String> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "undo" | "u" => return Ok(Turn::Undo),
        "quit" | "q" | "exit" => return Ok(Turn::Quit),
        _ => {}
    }

    let position = Position::parse(line).ok_or_else(|| format!("Not a cell: {:?}", line))?;
    if !board.get_cell(position).is_empty() {
        return Err(format!("{} is already taken", position.label()));
    }
    Ok(Turn::Place(position))
}

#[async_trait]
impl<R, W> Player for HumanPlayer<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    #[instrument(skip(self, board), fields(name = %self.name))]
    async fn get_move(&mut self, board: &BoardState) -> Result<Turn> {
        self.prompt(&format!("\n{}\n\n", board.display())).await?;
        loop {
            let mark = board.current_player();
            self.prompt(&format!("{} ({}) > ", self.name, mark)).await?;

            let Some(line) = self.lines.next_line().await? else {
                bail!("Input closed");
            };

            match parse_turn(&line, board) {
                Ok(turn) => return Ok(turn),
                Err(reason) => {
                    warn!(%reason, "Rejected input");
                    self.prompt(&format!("{}\n", reason)).await?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_tictactoe::Player as Mark;

    #[test]
    fn test_parse_turn() {
        let mut board = BoardState::new(Mark::X, true);
        board.place(Position::CENTER).unwrap();

        assert_eq!(parse_turn("1", &board), Ok(Turn::Place(Position::from_index(0).unwrap())));
        assert_eq!(parse_turn(" UNDO ", &board), Ok(Turn::Undo));
        assert_eq!(parse_turn("q", &board), Ok(Turn::Quit));
        assert!(parse_turn("5", &board).unwrap_err().contains("taken"));
        assert!(parse_turn("banana", &board).is_err());
    }

    #[tokio::test]
    async fn test_reprompts_until_valid() {
        let board = BoardState::new(Mark::X, true);
        let input: &[u8] = b"nope\n0\n2,2\n";
        let mut out = Vec::new();
        let turn = {
            let mut human = HumanPlayer::new("Ann", input, &mut out);
            human.get_move(&board).await.unwrap()
        };
        assert_eq!(turn, Turn::Place(Position::new(2, 2).unwrap()));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Ann (X) > ").count(), 3);
    }

    #[tokio::test]
    async fn test_closed_input_is_error() {
        let board = BoardState::new(Mark::X, true);
        let input: &[u8] = b"";
        let mut human = HumanPlayer::new("Ann", input, tokio::io::sink());
        assert!(human.get_move(&board).await.is_err());
    }
}
