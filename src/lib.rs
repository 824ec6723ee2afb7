//! # arcade-core
//!
//! Deterministic simulation core for casual browser games.
//!
//! ## Design Principles
//!
//! 1. **UI-Agnostic**: Simulators are plain state machines. Rendering,
//!    routing and input mapping belong to the host.
//!
//! 2. **Reproducible**: All randomness flows through a seedable `GameRng`.
//!    The same seed and call sequence give bit-identical rounds.
//!
//! 3. **Total Operations**: Illegal calls are ignored and report `false` or
//!    `None`. Collisions, stuck boards and solved puzzles are state
//!    transitions to `GameOver`, never errors.
//!
//! ## Architecture
//!
//! - **Shared Lifecycle**: Every simulator implements `Game`
//!   (`start`/`pause`/`resume`/`reset`) on top of a `Session` holding the
//!   state, the score and the game data.
//!
//! - **Injected Collaborators**: High scores go to a `HighScoreStore`;
//!   periodic work (Snake ticks, the Sudoku clock) goes through a
//!   `Scheduler`. Tests use `MemoryStore` and `ManualScheduler`.
//!
//! ## Modules
//!
//! - `core`: Lifecycle trait, game state, scores, RNG, configuration
//! - `storage`: High-score persistence
//! - `schedule`: Periodic callbacks
//! - `games`: Snake, Sudoku and 2048
//!
//! The simulators are single-threaded: hosts that share one across threads
//! must serialize access themselves.

pub mod core;
pub mod games;
pub mod schedule;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    Difficulty, Game, GameRng, GameState, ScoreKeeper, Session, SnakeConfig, SudokuConfig,
    TwentyFortyEightConfig,
};

pub use crate::storage::{FileStore, HighScoreStore, MemoryStore, StoreError};

pub use crate::schedule::{ManualScheduler, Scheduler, Task, TaskHandle};
#[cfg(feature = "tokio")]
pub use crate::schedule::TokioScheduler;

pub use crate::games::snake::{SnakeBoard, SnakeGame, StepOutcome};
pub use crate::games::sudoku::{Hint, Puzzle, SudokuBoard, SudokuGame};
pub use crate::games::twenty48::{Board, TileRound, TwentyFortyEightGame};
pub use crate::games::GameKind;
