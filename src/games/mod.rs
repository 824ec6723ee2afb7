//! Concrete simulators.
//!
//! Each game lives in its own module, owns its data exclusively and depends
//! only on `core`, `storage` and `schedule`, never on another game.

pub mod snake;
pub mod sudoku;
pub mod twenty48;

use serde::{Deserialize, Serialize};

/// The simulators this crate provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Snake,
    Sudoku,
    #[serde(rename = "2048")]
    TwentyFortyEight,
}

impl GameKind {
    /// Every simulator, in catalog order.
    #[must_use]
    pub fn all() -> [GameKind; 3] {
        [GameKind::Snake, GameKind::Sudoku, GameKind::TwentyFortyEight]
    }

    /// Key the simulator's high score is stored under.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            GameKind::Snake => snake::SNAKE_SLUG,
            GameKind::Sudoku => sudoku::SUDOKU_SLUG,
            GameKind::TwentyFortyEight => twenty48::TWENTY48_SLUG,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GameKind::Snake => "Snake",
            GameKind::Sudoku => "Sudoku",
            GameKind::TwentyFortyEight => "2048",
        }
    }
}
