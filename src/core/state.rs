//! Lifecycle state shared by every simulator.
//!
//! ```text
//! Ready ──start──▶ Playing ◀──resume── Paused
//!                    │  └────pause────▶  │
//!                    ▼                   │
//!                 GameOver ◀─────────────┘ (start restarts)
//! ```
//!
//! `GameOver` is terminal; only `reset()` returns to `Ready` and `start()`
//! begins a new round.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a simulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    /// Constructed or reset, no round in progress.
    #[default]
    Ready,
    /// Round in progress; moves are accepted.
    Playing,
    /// Round suspended; data kept, moves ignored.
    Paused,
    /// Round finished.
    GameOver,
}

impl GameState {
    /// True while moves are accepted.
    #[must_use]
    pub fn is_active(self) -> bool {
        self == GameState::Playing
    }

    /// True once the round has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == GameState::GameOver
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameState::Ready => "READY",
            GameState::Playing => "PLAYING",
            GameState::Paused => "PAUSED",
            GameState::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}
