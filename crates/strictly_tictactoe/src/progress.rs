//! Match tallies and the rules that unlock levels and features.
//!
//! Everything here is in-memory bookkeeping over finished [`GameResult`]s.

use crate::board::GameResult;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Running counts of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Tally {
    wins: u32,
    losses: u32,
    ties: u32,
    win_streak: u32,
    lose_streak: u32,
    tie_streak: u32,
    not_lose_streak: u32,
}

impl Tally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one finished game. `InProgress` is ignored.
    #[instrument(skip(self))]
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => {
                self.wins += 1;
                self.win_streak += 1;
                self.not_lose_streak += 1;
                self.lose_streak = 0;
                self.tie_streak = 0;
            }
            GameResult::Lose => {
                self.losses += 1;
                self.lose_streak += 1;
                self.win_streak = 0;
                self.tie_streak = 0;
                self.not_lose_streak = 0;
            }
            GameResult::Tie => {
                self.ties += 1;
                self.tie_streak += 1;
                self.not_lose_streak += 1;
                self.win_streak = 0;
                self.lose_streak = 0;
            }
            GameResult::InProgress => return,
        }
        debug!(?self, "Recorded result");
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Wins plus ties.
    pub fn not_lost(&self) -> u32 {
        self.wins + self.ties
    }
}

/// Which counter an unlock rule watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum UnlockKind {
    /// Only unlocked explicitly.
    Manual,
    /// Total wins.
    WinCount,
    /// Consecutive wins.
    WinStreak,
    /// Total losses.
    LoseCount,
    /// Consecutive losses.
    LoseStreak,
    /// Total ties.
    TieCount,
    /// Consecutive ties.
    TieStreak,
    /// Total wins and ties.
    NotLoseCount,
    /// Consecutive games without a loss.
    NotLoseStreak,
}

/// A threshold over one [`Tally`] counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct UnlockRule {
    kind: UnlockKind,
    count: u32,
}

impl UnlockRule {
    /// Checks if the tally has reached the threshold. `Manual` never is.
    pub fn is_met(&self, tally: &Tally) -> bool {
        let value = match self.kind {
            UnlockKind::Manual => return false,
            UnlockKind::WinCount => tally.wins,
            UnlockKind::WinStreak => tally.win_streak,
            UnlockKind::LoseCount => tally.losses,
            UnlockKind::LoseStreak => tally.lose_streak,
            UnlockKind::TieCount => tally.ties,
            UnlockKind::TieStreak => tally.tie_streak,
            UnlockKind::NotLoseCount => tally.not_lost(),
            UnlockKind::NotLoseStreak => tally.not_lose_streak,
        };
        value >= self.count
    }
}

/// What a level counts as a passing game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
pub enum PassCondition {
    /// Only wins count.
    #[default]
    Win,
    /// Wins and ties count.
    NotLose,
}

impl PassCondition {
    /// Checks if `result` counts toward passing.
    pub fn is_satisfied_by(self, result: GameResult) -> bool {
        match self {
            PassCondition::Win => result == GameResult::Win,
            PassCondition::NotLose => matches!(result, GameResult::Win | GameResult::Tie),
        }
    }
}
