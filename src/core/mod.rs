//! Shared building blocks: lifecycle, scores, RNG, configuration.
//!
//! Nothing in here knows about a particular game. Simulators under
//! `games/` compose these pieces.

pub mod config;
pub mod lifecycle;
pub mod rng;
pub mod score;
pub mod state;

pub use config::{Difficulty, SnakeConfig, SudokuConfig, TwentyFortyEightConfig};
pub use lifecycle::{Game, Session};
pub use rng::GameRng;
pub use score::ScoreKeeper;
pub use state::GameState;
