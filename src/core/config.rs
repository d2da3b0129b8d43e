//! Game configuration types.
//!
//! The ladder is data, not code. Hosts provide:
//! - `prizes`: one prize per level; its length is the ladder length
//! - `fireproof_levels`: checkpoints the prize never falls below on failure
//! - `time_limit_secs`: wall-clock budget for a whole game
//! - `HelpConfig`: tuning for the help payload generators
//!
//! `GameConfig::default()` is the classic 15-question ladder.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

/// Classic 15-level prize table.
pub const DEFAULT_PRIZES: [u64; 15] = [
    100, 200, 300, 500, 1_000, 2_000, 4_000, 8_000, 16_000, 32_000, 64_000, 125_000, 250_000,
    500_000, 1_000_000,
];

/// Classic fireproof checkpoints (levels 5, 10 and 15 in one-based terms).
pub const DEFAULT_FIREPROOF_LEVELS: [u32; 3] = [4, 9, 14];

/// Classic time limit: 35 minutes.
pub const DEFAULT_TIME_LIMIT_SECS: i64 = 35 * 60;

/// Upper bound for any audience weight range.
pub const MAX_AUDIENCE_WEIGHT: u32 = 1_000_000;

/// Tuning for the help payload generators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Probability that the friend names the correct letter.
    pub friend_accuracy: f64,

    /// Inclusive range of the base vote weight every letter receives.
    pub audience_base: (u32, u32),

    /// Inclusive range of the extra weight added to the correct letter.
    pub audience_bonus: (u32, u32),

    /// Names the friend call picks from.
    pub friend_names: Vec<String>,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            friend_accuracy: 0.8,
            audience_base: (45, 90),
            audience_bonus: (10, 40),
            friend_names: [
                "Aunt Martha",
                "Professor Hale",
                "Uncle Boris",
                "Coach Rivera",
                "Grandpa Joe",
                "Doctor Lin",
                "Neighbour Sam",
            ]
            .iter()
            .map(|name| (*name).to_string())
            .collect(),
        }
    }
}

impl HelpConfig {
    /// Set the friend's accuracy.
    #[must_use]
    pub fn with_friend_accuracy(mut self, accuracy: f64) -> Self {
        self.friend_accuracy = accuracy;
        self
    }

    /// Replace the friend name list.
    #[must_use]
    pub fn with_friend_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.friend_names = names.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.friend_accuracy) {
            return Err(GameError::InvalidConfig(format!(
                "friend_accuracy must be within [0, 1], got {}",
                self.friend_accuracy
            )));
        }
        if self.audience_base.0 > self.audience_base.1 || self.audience_base.1 == 0 {
            return Err(GameError::InvalidConfig(
                "audience_base must be a non-empty, non-zero range".into(),
            ));
        }
        if self.audience_bonus.0 > self.audience_bonus.1 {
            return Err(GameError::InvalidConfig("audience_bonus range is empty".into()));
        }
        if self.audience_base.1 > MAX_AUDIENCE_WEIGHT || self.audience_bonus.1 > MAX_AUDIENCE_WEIGHT {
            return Err(GameError::InvalidConfig(format!(
                "audience weights must not exceed {}",
                MAX_AUDIENCE_WEIGHT
            )));
        }
        if self.friend_names.is_empty() {
            return Err(GameError::InvalidConfig("friend_names must not be empty".into()));
        }
        Ok(())
    }
}

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use money_ladder::core::GameConfig;
///
/// let config = GameConfig::new(vec![10, 20, 50, 100])
///     .with_fireproof_levels(vec![1])
///     .with_time_limit_secs(60);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.ladder_len(), 4);
/// assert_eq!(config.fireproof_prize(2), 20);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Prize for each level, strictly increasing.
    pub prizes: Vec<u64>,

    /// Levels whose prize is guaranteed once cleared.
    pub fireproof_levels: Vec<u32>,

    /// Time budget for the whole game, in seconds.
    pub time_limit_secs: i64,

    /// Help generator tuning.
    pub help: HelpConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            prizes: DEFAULT_PRIZES.to_vec(),
            fireproof_levels: DEFAULT_FIREPROOF_LEVELS.to_vec(),
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            help: HelpConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a configuration with the given prize table and no checkpoints.
    pub fn new(prizes: Vec<u64>) -> Self {
        Self {
            prizes,
            fireproof_levels: Vec::new(),
            ..Self::default()
        }
    }

    /// Set the fireproof checkpoints.
    #[must_use]
    pub fn with_fireproof_levels(mut self, levels: Vec<u32>) -> Self {
        self.fireproof_levels = levels;
        self
    }

    /// Set the time limit.
    #[must_use]
    pub fn with_time_limit_secs(mut self, secs: i64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Set the help tuning.
    #[must_use]
    pub fn with_help(mut self, help: HelpConfig) -> Self {
        self.help = help;
        self
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfig` if the prize table is empty or not
    /// strictly increasing, a checkpoint is outside the ladder, the time
    /// limit is not positive, or the help tuning is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.prizes.is_empty() {
            return Err(GameError::InvalidConfig("prize table is empty".into()));
        }
        if self.prizes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GameError::InvalidConfig(
                "prizes must be strictly increasing".into(),
            ));
        }
        if let Some(level) = self
            .fireproof_levels
            .iter()
            .find(|&&level| level as usize >= self.prizes.len())
        {
            return Err(GameError::InvalidConfig(format!(
                "fireproof level {} is outside a ladder of {} levels",
                level,
                self.prizes.len()
            )));
        }
        if self.time_limit_secs <= 0 {
            return Err(GameError::InvalidConfig("time limit must be positive".into()));
        }
        if Duration::try_seconds(self.time_limit_secs).is_none() {
            return Err(GameError::InvalidConfig(format!(
                "time limit of {} seconds is out of range",
                self.time_limit_secs
            )));
        }
        self.help.validate()
    }

    /// Number of levels in the ladder.
    #[must_use]
    pub fn ladder_len(&self) -> usize {
        self.prizes.len()
    }

    /// Highest level index.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.prizes.len().saturating_sub(1) as u32
    }

    /// Time limit as a duration. Out-of-range limits, which `validate`
    /// rejects, saturate instead of panicking.
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::try_seconds(self.time_limit_secs).unwrap_or(Duration::MAX)
    }

    /// Prize for clearing `level`, 0 if the level is outside the ladder.
    #[must_use]
    pub fn level_prize(&self, level: u32) -> u64 {
        self.prizes.get(level as usize).copied().unwrap_or(0)
    }

    /// Top prize of the ladder.
    #[must_use]
    pub fn max_prize(&self) -> u64 {
        self.prizes.last().copied().unwrap_or(0)
    }

    /// Guaranteed prize after clearing `cleared_level`: the prize of the
    /// highest checkpoint at or below it, 0 if none.
    #[must_use]
    pub fn fireproof_prize(&self, cleared_level: u32) -> u64 {
        self.fireproof_levels
            .iter()
            .copied()
            .filter(|&level| level <= cleared_level)
            .max()
            .map_or(0, |level| self.level_prize(level))
    }
}
