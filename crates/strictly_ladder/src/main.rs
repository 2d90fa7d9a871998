//! Strictly Ladder - terminal CLI
//!
//! Play tic-tac-toe against a ladder of computer opponents, or pit two
//! strategies against each other.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use strictly_ladder::cli::{Cli, Command};
use strictly_ladder::{
    ComputerPlayer, GameEvent, HumanPlayer, Ladder, LadderConfig, LadderReport, MatchOutcome,
    Matchup, Orchestrator, Player, simulate,
};
use strictly_tictactoe::{Ai, BoardState, Player as Mark};
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            level_id,
            ai_level,
            self_first,
            config,
        } => run_play(level_id, ai_level, self_first, config).await,
        Command::Simulate {
            x_level,
            o_level,
            games,
            seed,
        } => run_simulate(x_level, o_level, games, seed).await,
        Command::Levels { config } => run_levels(config),
    }
}

/// Play the ladder, or a single game when a strategy level is given.
#[instrument(skip(config_path), fields(config = %config_path.display()))]
async fn run_play(
    level_id: Option<u32>,
    ai_level: Option<i64>,
    self_first: bool,
    config_path: PathBuf,
) -> Result<()> {
    let config = LadderConfig::load_or_default(&config_path)?;
    let human_mark = *config.self_player();
    let think_delay = Duration::from_millis(*config.think_delay_ms());
    let mut human: Box<dyn Player> = Box::new(HumanPlayer::stdio("You"));

    println!("Enter 1-9, x,y or a cell name. 'undo' takes back a move, 'quit' leaves.");

    if let Some(level) = ai_level {
        let ai = Ai::from_level(level);
        info!(%ai, "Starting unranked game");
        let computer =
            Box::new(ComputerPlayer::new(ai.to_string(), ai).with_think_delay(think_delay));
        let board = BoardState::new(human_mark, self_first);
        let (outcome, _) = play_game(human_mark, human, computer, board).await?;
        if let MatchOutcome::Finished(result) = outcome {
            println!("Result: {}", result);
        }
        return Ok(());
    }

    let mut ladder = Ladder::new(config.clone());
    let mut index = match level_id {
        Some(id) => config
            .levels()
            .iter()
            .position(|level| *level.id() == id)
            .with_context(|| format!("No level with id {}", id))?,
        None => 0,
    };

    'ladder: while let Some(level) = config.levels().get(index) {
        println!("\n== Level {}: {} ==", level.id(), level.opponent_name());
        if !level.goal_text().is_empty() {
            println!("Goal: {}", level.goal_text());
        }

        let ai = Ai::from_level(*level.ai_level());
        info!(level_id = level.id(), %ai, "Starting level");

        while !ladder.is_cleared(level) {
            let computer = Box::new(
                ComputerPlayer::new(level.opponent_name().clone(), ai)
                    .with_think_delay(think_delay),
            );
            let board = BoardState::new(human_mark, self_first);
            let (outcome, returned) = play_game(human_mark, human, computer, board).await?;
            human = returned;

            let MatchOutcome::Finished(result) = outcome else {
                break 'ladder;
            };
            let report = ladder.record(*level.id(), result);
            print_report(&report, &config);
        }
        index += 1;
    }

    print_summary(&ladder);
    Ok(())
}

/// Plays one game and hands the human player back.
async fn play_game(
    human_mark: Mark,
    human: Box<dyn Player>,
    computer: Box<dyn Player>,
    board: BoardState,
) -> Result<(MatchOutcome, Box<dyn Player>)> {
    let (player_x, player_o) = match human_mark {
        Mark::X => (human, computer),
        Mark::O => (computer, human),
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let renderer = tokio::spawn(render(event_rx));

    let mut orchestrator = Orchestrator::new(board, player_x, player_o, event_tx);
    let outcome = orchestrator.run().await;
    let (player_x, player_o) = orchestrator.into_players();
    renderer.await?;

    let human = match human_mark {
        Mark::X => player_x,
        Mark::O => player_o,
    };
    Ok((outcome?, human))
}

/// Prints game events until the orchestrator hangs up.
async fn render(mut events: mpsc::UnboundedReceiver<GameEvent>) {
    let mut board = String::new();
    while let Some(event) = events.recv().await {
        match event {
            GameEvent::StateChanged(text) => board = text,
            GameEvent::Thinking { player } => println!("{} is thinking...", player),
            GameEvent::MoveMade {
                player,
                mark,
                position,
            } => println!("{} ({}) played {}", player, mark, position.label()),
            GameEvent::Undone { plies } => println!("Took back {} moves", plies),
            GameEvent::UndoRejected => println!("Nothing to undo yet"),
            GameEvent::GameOver {
                result,
                winner,
                line,
            } => {
                println!("\n{}\n", board);
                match (winner, line) {
                    (Some(name), Some(line)) => println!("{} wins on {}. {}", name, line, result),
                    _ => println!("Board full. {}", result),
                }
            }
        }
    }
}

fn print_report(report: &LadderReport, config: &LadderConfig) {
    println!("Progress: {}/{}", report.passes(), report.required());
    if *report.level_cleared() {
        println!("Level cleared!");
    }
    for key in report.unlocked() {
        match config.features().iter().find(|f| f.key() == key) {
            Some(feature) if !feature.description().is_empty() => {
                println!("Unlocked: {} ({})", feature.name(), feature.description())
            }
            Some(feature) => println!("Unlocked: {}", feature.name()),
            None => println!("Unlocked: {}", key),
        }
    }
}

fn print_summary(ladder: &Ladder) {
    let tally = ladder.overall();
    println!(
        "\nSession: {} wins, {} losses, {} ties",
        tally.wins(),
        tally.losses(),
        tally.ties()
    );
    if ladder.current_level().is_none() {
        println!("Every level cleared.");
    }
    if !ladder.unlocked().is_empty() {
        let keys: Vec<&str> = ladder.unlocked().iter().map(String::as_str).collect();
        println!("Unlocked: {}", keys.join(", "));
    }
}

/// Run computer-versus-computer games and print the tally
#[instrument]
async fn run_simulate(x_level: i64, o_level: i64, games: u32, seed: u64) -> Result<()> {
    let matchup = Matchup::new(Ai::from_level(x_level), Ai::from_level(o_level), games, seed);
    info!(?matchup, "Starting simulation");

    let tally = simulate(matchup).await?;
    println!(
        "X ({}) vs O ({}), {} games, seed {}",
        matchup.x(),
        matchup.o(),
        games,
        seed
    );
    println!(
        "X wins: {}  O wins: {}  Ties: {}",
        tally.wins(),
        tally.losses(),
        tally.ties()
    );
    Ok(())
}

/// List the ladder
#[instrument(skip(config_path), fields(config = %config_path.display()))]
fn run_levels(config_path: PathBuf) -> Result<()> {
    let config = LadderConfig::load_or_default(&config_path)?;

    println!("You play {}", config.self_player());
    for level in config.levels() {
        println!(
            "{:>5}  {:<12} {:<10} {} x{}  {}",
            level.id(),
            level.opponent_name(),
            Ai::from_level(*level.ai_level()),
            level.pass_condition(),
            level.pass_count(),
            level.goal_text()
        );
    }

    if !config.features().is_empty() {
        println!("\nFeatures:");
        for feature in config.features() {
            let target = match feature.target_id() {
                Some(id) => format!(" on level {}", id),
                None => String::new(),
            };
            println!(
                "  {:<14} {} ({} {}{})",
                feature.key(),
                feature.name(),
                feature.kind(),
                feature.count(),
                target
            );
        }
    }
    Ok(())
}
