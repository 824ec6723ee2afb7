//! Snake: grid movement with wall, self-collision and food rules.
//!
//! - `SnakeBoard` holds the body, heading and food and implements one tick
//! - `SnakeGame` wraps it in the shared lifecycle and optional autoplay

mod board;
mod game;

pub use board::{Direction, Position, SnakeBoard, StepOutcome, INITIAL_LENGTH};
pub use game::{SnakeGame, SnakeGameBuilder, SNAKE_SLUG};
