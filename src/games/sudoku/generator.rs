//! Puzzle generation: full-solution search followed by given selection.
//!
//! ## Phases
//!
//! 1. The three diagonal boxes share no row or column, so each is filled
//!    with an independent shuffle of 1..=9.
//! 2. A randomized depth-first backtracking search completes the grid.
//! 3. All 81 coordinates are shuffled and a difficulty-sized prefix is kept
//!    as givens.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::{coordinates, is_placement_valid, is_solved, Digits, BOX, SIZE};
use crate::core::{Difficulty, GameRng};

/// A generated (or loaded) puzzle: givens plus the solution they came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    givens: Digits,
    solution: Digits,
    difficulty: Difficulty,
}

impl Puzzle {
    /// Generate a fresh puzzle.
    pub fn generate(difficulty: Difficulty, rng: &mut GameRng) -> Self {
        let solution = generate_solution(rng);
        let count = rng.gen_range_inclusive(difficulty.given_range());
        let givens = select_givens(&solution, count, rng);
        debug!(%difficulty, givens = count, "generated sudoku puzzle");
        Self {
            givens,
            solution,
            difficulty,
        }
    }

    /// Build a puzzle from known digits.
    ///
    /// Returns `None` unless `solution` is a valid completed grid and every
    /// non-zero given agrees with it.
    #[must_use]
    pub fn from_digits(givens: Digits, solution: Digits, difficulty: Difficulty) -> Option<Self> {
        let consistent = coordinates().all(|(r, c)| givens[r][c] == 0 || givens[r][c] == solution[r][c]);
        (is_solved(&solution) && consistent).then_some(Self {
            givens,
            solution,
            difficulty,
        })
    }

    #[must_use]
    pub fn givens(&self) -> &Digits {
        &self.givens
    }

    #[must_use]
    pub fn solution(&self) -> &Digits {
        &self.solution
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn given_count(&self) -> usize {
        self.givens.iter().flatten().filter(|&&d| d != 0).count()
    }
}

/// Produce a complete, valid 9×9 solution.
pub fn generate_solution(rng: &mut GameRng) -> Digits {
    let mut digits = [[0u8; SIZE]; SIZE];
    fill_diagonal_boxes(&mut digits, rng);
    // Independent diagonal boxes always extend to a full grid.
    let solved = solve(&mut digits, rng);
    debug_assert!(solved, "diagonal seed must be completable");
    digits
}

fn fill_diagonal_boxes(digits: &mut Digits, rng: &mut GameRng) {
    for start in (0..SIZE).step_by(BOX) {
        let mut values: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
        rng.shuffle(&mut values);
        for (i, value) in values.into_iter().enumerate() {
            digits[start + i / BOX][start + i % BOX] = value;
        }
    }
}

/// Complete `digits` in place by randomized backtracking.
///
/// Candidates at each empty cell are tried in shuffled order. Returns false
/// (leaving `digits` as it was) if no completion exists.
pub fn solve(digits: &mut Digits, rng: &mut GameRng) -> bool {
    let Some((row, col)) = coordinates().find(|&(r, c)| digits[r][c] == 0) else {
        return true;
    };

    let mut candidates: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    rng.shuffle(&mut candidates);

    for value in candidates {
        if is_placement_valid(digits, row, col, value) {
            digits[row][col] = value;
            if solve(digits, rng) {
                return true;
            }
            digits[row][col] = 0;
        }
    }
    false
}

fn select_givens(solution: &Digits, count: usize, rng: &mut GameRng) -> Digits {
    let mut cells: Vec<(usize, usize)> = coordinates().collect();
    rng.shuffle(&mut cells);

    let mut givens = [[0u8; SIZE]; SIZE];
    for &(r, c) in cells.iter().take(count) {
        givens[r][c] = solution[r][c];
    }
    givens
}
