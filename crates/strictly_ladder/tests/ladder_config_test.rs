//! Loading ladder configs from disk.

use std::io::Write;
use strictly_ladder::{Ladder, LadderConfig};
use strictly_tictactoe::{GameResult, PassCondition, Player as Mark};

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
self_player = "O"
think_delay_ms = 0

[[levels]]
id = 7
ai_level = 2
opponent_name = "Wall"
pass_condition = "not_lose"
pass_count = 2
goal_text = "Hold the draw twice"
unlock_features = ["wall"]

[[features]]
key = "wall"
name = "Wall Breaker"
kind = "manual"
"#
    )
    .unwrap();

    let config = LadderConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.self_player(), Mark::O);
    let level = config.level(7).unwrap();
    assert_eq!(level.opponent_name(), "Wall");
    assert_eq!(*level.pass_condition(), PassCondition::NotLose);

    let mut ladder = Ladder::new(config);
    ladder.record(7, GameResult::Tie);
    let report = ladder.record(7, GameResult::Win);
    assert!(report.level_cleared());
    assert!(ladder.unlocked().contains("wall"));
    assert!(ladder.current_level().is_none());
}

#[test]
fn test_missing_file_uses_built_in_ladder() {
    let dir = tempfile::tempdir().unwrap();
    let config = LadderConfig::load_or_default(dir.path().join("ladder.toml")).unwrap();
    assert_eq!(config.levels().len(), 3);
    assert_eq!(*config.levels()[0].ai_level(), 0);
}

#[test]
fn test_invalid_file_reports_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "levels = \"not a list\"").unwrap();

    let err = LadderConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_unreadable_path_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = LadderConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}
