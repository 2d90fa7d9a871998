//! Games driven through the orchestrator with typed input.

use strictly_ladder::{ComputerPlayer, GameEvent, HumanPlayer, MatchOutcome, Orchestrator};
use strictly_tictactoe::{Ai, BoardState, Player as Mark, Position};
use tokio::sync::mpsc;

fn pos(x: u8, y: u8) -> Position {
    Position::new(x, y).unwrap()
}

fn orchestrator(input: &'static [u8]) -> (Orchestrator, mpsc::UnboundedReceiver<GameEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let human = HumanPlayer::new("Ann", input, tokio::io::sink());
    let computer = ComputerPlayer::seeded("Oracle", Ai::Minimax, 0);
    let orchestrator = Orchestrator::new(
        BoardState::new(Mark::X, true),
        Box::new(human),
        Box::new(computer),
        tx,
    );
    (orchestrator, rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_minimax_answers_center_with_corner() {
    let (mut orchestrator, mut rx) = orchestrator(b"5\nquit\n");
    let outcome = orchestrator.run().await.unwrap();

    assert_eq!(outcome, MatchOutcome::Abandoned);
    assert_eq!(orchestrator.board().history(), &[Position::CENTER, pos(0, 0)]);

    let events = drain(&mut rx);
    assert!(events.contains(&GameEvent::Thinking {
        player: "Oracle".to_string()
    }));
    assert!(events.contains(&GameEvent::MoveMade {
        player: "Oracle".to_string(),
        mark: Mark::O,
        position: pos(0, 0),
    }));
}

#[tokio::test]
async fn test_undo_then_replay() {
    let (mut orchestrator, mut rx) = orchestrator(b"center\nundo\n1\nq\n");
    let outcome = orchestrator.run().await.unwrap();

    assert_eq!(outcome, MatchOutcome::Abandoned);
    // Against a corner the only drawing reply is the center.
    assert_eq!(orchestrator.board().history(), &[pos(0, 0), Position::CENTER]);
    assert!(drain(&mut rx).contains(&GameEvent::Undone { plies: 2 }));
}

#[tokio::test]
async fn test_taken_cell_is_reprompted_not_fatal() {
    let (mut orchestrator, _rx) = orchestrator(b"5\n1\n2\nquit\n");
    let outcome = orchestrator.run().await.unwrap();

    assert_eq!(outcome, MatchOutcome::Abandoned);
    // "1" is the Oracle's corner, so the human's second move is "2".
    assert_eq!(
        orchestrator.board().history()[..3],
        [Position::CENTER, pos(0, 0), pos(1, 0)]
    );
}

#[tokio::test]
async fn test_closed_input_ends_run_with_error() {
    let (mut orchestrator, _rx) = orchestrator(b"5\n");
    assert!(orchestrator.run().await.is_err());
}
