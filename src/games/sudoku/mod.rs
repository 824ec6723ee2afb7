//! Sudoku: puzzle generation, move validation, mistakes and hints.
//!
//! - `grid`: cells, pencil marks and the row/column/box rule
//! - `generator`: diagonal seeding plus randomized backtracking
//! - `game`: `SudokuGame` lifecycle, scoring and the round clock

mod game;
pub mod generator;
pub mod grid;

pub use game::{Hint, SudokuBoard, SudokuGame, SudokuGameBuilder, BASE_SCORE, MISTAKE_PENALTY, SUDOKU_SLUG};
pub use generator::Puzzle;
pub use grid::{Cell, Digits, Grid, NoteMask};
