//! Simulator configuration types.
//!
//! Each simulator is configured at construction by one of these structs.
//! All of them deserialize with defaults for missing fields, so a host can
//! keep a partial config in whatever format it prefers.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Sudoku difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Inclusive range of revealed cells for a generated puzzle.
    #[must_use]
    pub fn given_range(self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Easy => 35..=45,
            Difficulty::Medium => 27..=35,
            Difficulty::Hard => 17..=27,
        }
    }

    /// Hints available per round.
    #[must_use]
    pub fn hint_budget(self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 3,
            Difficulty::Hard => 2,
        }
    }

    /// Mistakes that end the round, if any.
    #[must_use]
    pub fn mistake_limit(self) -> Option<u32> {
        match self {
            Difficulty::Hard => Some(3),
            Difficulty::Easy | Difficulty::Medium => None,
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Snake configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Grid width in cells (minimum 4).
    pub width: i32,

    /// Grid height in cells (minimum 1).
    pub height: i32,

    /// Milliseconds between ticks while playing.
    pub tick_ms: u64,

    /// Points awarded per food eaten.
    pub food_points: u32,

    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            tick_ms: 150,
            food_points: 10,
            seed: None,
        }
    }
}

impl SnakeConfig {
    /// Set the grid size. Values are clamped to the playable minimum.
    #[must_use]
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width.max(4);
        self.height = height.max(1);
        self
    }

    #[must_use]
    pub fn with_tick(mut self, period: Duration) -> Self {
        self.tick_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Tick period as a `Duration`.
    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Sudoku configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SudokuConfig {
    /// Difficulty used by `start()`.
    pub difficulty: Difficulty,

    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl SudokuConfig {
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// 2048 configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwentyFortyEightConfig {
    /// Probability that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,

    /// Tile value that counts as a win.
    pub win_tile: u32,

    /// RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for TwentyFortyEightConfig {
    fn default() -> Self {
        Self {
            four_probability: 0.1,
            win_tile: 2048,
            seed: None,
        }
    }
}

impl TwentyFortyEightConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_tables() {
        assert_eq!(Difficulty::Easy.given_range(), 35..=45);
        assert_eq!(Difficulty::Medium.given_range(), 27..=35);
        assert_eq!(Difficulty::Hard.given_range(), 17..=27);

        assert_eq!(Difficulty::Easy.hint_budget(), 5);
        assert_eq!(Difficulty::Medium.hint_budget(), 3);
        assert_eq!(Difficulty::Hard.hint_budget(), 2);

        assert_eq!(Difficulty::Hard.mistake_limit(), Some(3));
        assert_eq!(Difficulty::Easy.mistake_limit(), None);
    }

    #[test]
    fn test_default_snake_config() {
        let config = SnakeConfig::default();
        assert_eq!((config.width, config.height), (20, 20));
        assert_eq!(config.tick_period(), Duration::from_millis(150));
        assert_eq!(config.food_points, 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SnakeConfig::default()
            .with_size(2, 0)
            .with_tick(Duration::from_millis(80))
            .with_seed(7);
        assert_eq!((config.width, config.height), (4, 1));
        assert_eq!(config.tick_ms, 80);
        assert_eq!(config.seed, Some(7));

        assert_eq!(SnakeConfig::default().with_tick(Duration::ZERO).tick_ms, 1);
        assert_eq!(SnakeConfig::default().with_tick(Duration::MAX).tick_ms, u64::MAX);

        let config = TwentyFortyEightConfig::default().with_four_probability(3.0);
        assert_eq!(config.four_probability, 1.0);
    }

    #[test]
    fn test_partial_deserialization() {
        let config: SudokuConfig = serde_json::from_str(r#"{"difficulty":"hard"}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, None);

        let config: SnakeConfig = serde_json::from_str(r#"{"tick_ms":100}"#).unwrap();
        assert_eq!(config.tick_ms, 100);
        assert_eq!(config.width, 20);
    }
}
