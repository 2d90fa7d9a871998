//! Ladder configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use strictly_tictactoe::{PassCondition, Player as Mark, UnlockKind, UnlockRule};
use tracing::{debug, info, instrument};

/// A full ladder: the levels in play order and the unlockable features.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LadderConfig {
    /// Side the human plays.
    #[serde(default = "default_self_player")]
    self_player: Mark,

    /// Pause before each computer move, in milliseconds.
    #[serde(default)]
    think_delay_ms: u64,

    /// Levels in play order.
    levels: Vec<LevelConfig>,

    /// Features unlocked by results.
    #[serde(default)]
    features: Vec<FeatureConfig>,
}

/// One rung of the ladder.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level identifier (e.g. 101, 201).
    id: u32,
    /// Strategy difficulty: 0 random, 1 heuristic, else minimax.
    ai_level: i64,
    /// Name shown for the computer opponent.
    opponent_name: String,
    /// Which results count toward clearing the level.
    #[serde(default)]
    pass_condition: PassCondition,
    /// Passing results needed.
    #[serde(default = "default_pass_count")]
    pass_count: u32,
    /// Goal shown before each game.
    #[serde(default)]
    goal_text: String,
    /// Feature keys unlocked when the level is cleared.
    #[serde(default)]
    unlock_features: Vec<String>,
}

/// A feature that unlocks when a tally reaches a threshold.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Unique key.
    key: String,
    /// Display name.
    name: String,
    /// What the player gets.
    #[serde(default)]
    description: String,
    /// Counter watched.
    kind: UnlockKind,
    /// Threshold.
    #[serde(default)]
    count: u32,
    /// Level whose tally is watched; the overall tally when absent.
    #[serde(default)]
    target_id: Option<u32>,
}

impl FeatureConfig {
    /// The unlock rule this feature is gated on.
    pub fn rule(&self) -> UnlockRule {
        UnlockRule::new(self.kind, self.count)
    }
}

#[instrument]
fn default_self_player() -> Mark {
    Mark::X
}

#[instrument]
fn default_pass_count() -> u32 {
    1
}

const DEFAULT_LADDER: &str = r#"
self_player = "X"
think_delay_ms = 400

[[levels]]
id = 101
ai_level = 0
opponent_name = "Rookie"
pass_condition = "win"
pass_count = 1
goal_text = "Win one game"

[[levels]]
id = 201
ai_level = 1
opponent_name = "Sentinel"
pass_condition = "win"
pass_count = 2
goal_text = "Win two games"

[[levels]]
id = 301
ai_level = 2
opponent_name = "Oracle"
pass_condition = "not_lose"
pass_count = 3
goal_text = "Avoid losing three times"
unlock_features = ["oracle_badge"]

[[features]]
key = "first_win"
name = "First Win"
description = "Won a game"
kind = "win_count"
count = 1

[[features]]
key = "unbeaten"
name = "Unbeaten"
description = "Five games in a row without a loss"
kind = "not_lose_streak"
count = 5

[[features]]
key = "stalemate"
name = "Stalemate"
description = "Three ties in a row against the Oracle"
kind = "tie_streak"
count = 3
target_id = 301

[[features]]
key = "oracle_badge"
name = "Oracle Badge"
description = "Cleared the final level"
kind = "manual"
"#;

impl LadderConfig {
    /// Parses and validates a TOML ladder.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(levels = config.levels.len(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the built-in ladder.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using built-in ladder");
            Self::from_toml(DEFAULT_LADDER)
        }
    }

    /// Looks up a level by id.
    pub fn level(&self, id: u32) -> Option<&LevelConfig> {
        self.levels.iter().find(|level| level.id == id)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::new("Ladder has no levels".to_string()));
        }

        let mut ids = HashSet::new();
        for level in &self.levels {
            if !ids.insert(level.id) {
                return Err(ConfigError::new(format!("Duplicate level id {}", level.id)));
            }
            if level.pass_count == 0 {
                return Err(ConfigError::new(format!(
                    "Level {} needs a pass_count of at least 1",
                    level.id
                )));
            }
        }

        let keys: HashSet<&str> = self.features.iter().map(|f| f.key.as_str()).collect();
        if keys.len() != self.features.len() {
            return Err(ConfigError::new("Duplicate feature key".to_string()));
        }
        for feature in &self.features {
            if let Some(target) = feature.target_id
                && !ids.contains(&target)
            {
                return Err(ConfigError::new(format!(
                    "Feature {} targets unknown level {}",
                    feature.key, target
                )));
            }
        }
        for level in &self.levels {
            if let Some(missing) = level
                .unlock_features
                .iter()
                .find(|key| !keys.contains(key.as_str()))
            {
                return Err(ConfigError::new(format!(
                    "Level {} unlocks unknown feature {}",
                    level.id, missing
                )));
            }
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ladder_is_valid() {
        let config = LadderConfig::from_toml(DEFAULT_LADDER).unwrap();
        assert_eq!(config.levels().len(), 3);
        assert_eq!(*config.self_player(), Mark::X);
        assert_eq!(*config.level(301).unwrap().pass_condition(), PassCondition::NotLose);
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let config = LadderConfig::from_toml(
            r#"
            [[levels]]
            id = 1
            ai_level = 2
            opponent_name = "Bot"
            "#,
        )
        .unwrap();
        let level = config.level(1).unwrap();
        assert_eq!(*level.pass_count(), 1);
        assert_eq!(*level.pass_condition(), PassCondition::Win);
        assert_eq!(*config.think_delay_ms(), 0);
        assert!(config.features().is_empty());
    }

    #[test]
    fn test_rejects_duplicate_levels() {
        let err = LadderConfig::from_toml(
            r#"
            [[levels]]
            id = 1
            ai_level = 0
            opponent_name = "A"

            [[levels]]
            id = 1
            ai_level = 1
            opponent_name = "B"
            "#,
        )
        .unwrap_err();
        assert!(err.message.contains("Duplicate level id 1"));
    }

    #[test]
    fn test_rejects_unknown_feature_target() {
        let err = LadderConfig::from_toml(
            r#"
            [[levels]]
            id = 1
            ai_level = 0
            opponent_name = "A"

            [[features]]
            key = "k"
            name = "K"
            kind = "win_count"
            count = 1
            target_id = 9
            "#,
        )
        .unwrap_err();
        assert!(err.message.contains("unknown level 9"));
    }

    #[test]
    fn test_rejects_empty_ladder() {
        assert!(LadderConfig::from_toml("levels = []").is_err());
    }
}
