//! Level progression over one session.

use crate::config::{LadderConfig, LevelConfig};
use derive_getters::Getters;
use std::collections::{BTreeSet, HashMap};
use strictly_tictactoe::{GameResult, Tally};
use tracing::{info, instrument};

/// What changed after recording a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct LadderReport {
    /// Passing results on the level so far.
    passes: u32,
    /// Passing results the level needs.
    required: u32,
    /// The level was cleared by this result.
    level_cleared: bool,
    /// Feature keys newly unlocked by this result.
    unlocked: Vec<String>,
}

/// Tracks tallies, level passes and unlocked features in memory.
#[derive(Debug, Clone)]
pub struct Ladder {
    config: LadderConfig,
    overall: Tally,
    per_level: HashMap<u32, Tally>,
    passes: HashMap<u32, u32>,
    unlocked: BTreeSet<String>,
}

impl Ladder {
    /// Starts a fresh session over `config`.
    #[instrument(skip(config))]
    pub fn new(config: LadderConfig) -> Self {
        Self {
            config,
            overall: Tally::new(),
            per_level: HashMap::new(),
            passes: HashMap::new(),
            unlocked: BTreeSet::new(),
        }
    }

    /// The ladder definition.
    pub fn config(&self) -> &LadderConfig {
        &self.config
    }

    /// Results across every level.
    pub fn overall(&self) -> &Tally {
        &self.overall
    }

    /// Results on one level.
    pub fn level_tally(&self, id: u32) -> Tally {
        self.per_level.get(&id).copied().unwrap_or_default()
    }

    /// Unlocked feature keys, sorted.
    pub fn unlocked(&self) -> &BTreeSet<String> {
        &self.unlocked
    }

    /// Checks if a level has enough passing results.
    pub fn is_cleared(&self, level: &LevelConfig) -> bool {
        self.passes.get(level.id()).copied().unwrap_or(0) >= *level.pass_count()
    }

    /// The first level not yet cleared, in ladder order.
    pub fn current_level(&self) -> Option<&LevelConfig> {
        self.config.levels().iter().find(|level| !self.is_cleared(level))
    }

    /// Records a finished game on `level_id`.
    ///
    /// Unknown levels and `InProgress` results change nothing.
    #[instrument(skip(self))]
    pub fn record(&mut self, level_id: u32, result: GameResult) -> LadderReport {
        let Some(level) = self.config.level(level_id).cloned() else {
            return LadderReport::default();
        };
        if !result.is_terminal() {
            return LadderReport::default();
        }

        self.overall.record(result);
        self.per_level.entry(level_id).or_default().record(result);

        let was_cleared = self.is_cleared(&level);
        if level.pass_condition().is_satisfied_by(result) {
            *self.passes.entry(level_id).or_default() += 1;
        }
        let level_cleared = !was_cleared && self.is_cleared(&level);

        let mut unlocked = Vec::new();
        if level_cleared {
            info!(level_id, "Level cleared");
            for key in level.unlock_features() {
                if self.unlocked.insert(key.clone()) {
                    unlocked.push(key.clone());
                }
            }
        }

        for feature in self.config.features() {
            if self.unlocked.contains(feature.key()) {
                continue;
            }
            let tally = match feature.target_id() {
                Some(target) if *target != level_id => continue,
                Some(target) => self.level_tally(*target),
                None => self.overall,
            };
            if feature.rule().is_met(&tally) {
                info!(key = %feature.key(), "Feature unlocked");
                self.unlocked.insert(feature.key().clone());
                unlocked.push(feature.key().clone());
            }
        }

        LadderReport {
            passes: self.passes.get(&level_id).copied().unwrap_or(0),
            required: *level.pass_count(),
            level_cleared,
            unlocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Ladder {
        let config = LadderConfig::from_toml(
            r#"
            [[levels]]
            id = 1
            ai_level = 0
            opponent_name = "A"
            pass_count = 2
            unlock_features = ["badge"]

            [[levels]]
            id = 2
            ai_level = 2
            opponent_name = "B"
            pass_condition = "not_lose"

            [[features]]
            key = "badge"
            name = "Badge"
            kind = "manual"

            [[features]]
            key = "first"
            name = "First"
            kind = "win_count"
            count = 1

            [[features]]
            key = "ties"
            name = "Ties"
            kind = "tie_count"
            count = 1
            target_id = 2
            "#,
        )
        .unwrap();
        Ladder::new(config)
    }

    #[test]
    fn test_level_clears_after_required_passes() {
        let mut ladder = ladder();
        assert_eq!(*ladder.current_level().unwrap().id(), 1);

        let report = ladder.record(1, GameResult::Win);
        assert_eq!(*report.passes(), 1);
        assert!(!report.level_cleared());
        assert_eq!(report.unlocked(), &vec!["first".to_string()]);

        ladder.record(1, GameResult::Lose);
        let report = ladder.record(1, GameResult::Win);
        assert!(report.level_cleared());
        assert_eq!(report.unlocked(), &vec!["badge".to_string()]);
        assert_eq!(*ladder.current_level().unwrap().id(), 2);

        // Further wins don't clear again.
        let report = ladder.record(1, GameResult::Win);
        assert!(!report.level_cleared());
        assert!(report.unlocked().is_empty());
    }

    #[test]
    fn test_targeted_feature_only_counts_its_level() {
        let mut ladder = ladder();
        ladder.record(1, GameResult::Tie);
        assert!(!ladder.unlocked().contains("ties"));

        let report = ladder.record(2, GameResult::Tie);
        assert!(report.level_cleared());
        assert!(ladder.unlocked().contains("ties"));
        assert!(ladder.current_level().unwrap().id() == &1);
        assert_eq!(*ladder.overall().ties(), 2);
        assert_eq!(*ladder.level_tally(2).ties(), 1);
    }

    #[test]
    fn test_unknown_level_ignored() {
        let mut ladder = ladder();
        assert_eq!(ladder.record(99, GameResult::Win), LadderReport::default());
        assert_eq!(ladder.overall().games(), 0);
    }
}
