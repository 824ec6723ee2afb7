//! Sudoku simulator: move validation, mistakes, hints and the round clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::generator::Puzzle;
use super::grid::{Cell, Digits, Grid, SIZE};
use crate::core::{Difficulty, Game, GameRng, GameState, ScoreKeeper, Session, SudokuConfig};
use crate::schedule::{Scheduler, TaskHandle};
use crate::storage::{HighScoreStore, MemoryStore};

/// Key the Sudoku high score is stored under.
pub const SUDOKU_SLUG: &str = "sudoku-highscore";

/// Score before time and mistake deductions.
pub const BASE_SCORE: i64 = 1000;

/// Deduction per mistake.
pub const MISTAKE_PENALTY: i64 = 100;

const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// A revealed solution value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub row: usize,
    pub col: usize,
    pub value: u8,
}

/// Sudoku game data: the grid being played and the solution it hides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuBoard {
    grid: Grid,
    solution: Digits,
    difficulty: Difficulty,
    mistakes: u32,
    hints_remaining: u32,
}

impl SudokuBoard {
    /// Blank board with no givens and no solution.
    #[must_use]
    pub fn empty(difficulty: Difficulty) -> Self {
        Self {
            grid: Grid::default(),
            solution: [[0; SIZE]; SIZE],
            difficulty,
            mistakes: 0,
            hints_remaining: difficulty.hint_budget(),
        }
    }

    #[must_use]
    pub fn from_puzzle(puzzle: &Puzzle) -> Self {
        Self {
            grid: Grid::from_givens(puzzle.givens()),
            solution: *puzzle.solution(),
            difficulty: puzzle.difficulty(),
            mistakes: 0,
            hints_remaining: puzzle.difficulty().hint_budget(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
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
    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    /// True iff every cell holds its solution value.
    ///
    /// A different but rule-valid completion does not count.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.grid
            .rows()
            .iter()
            .zip(self.solution.iter())
            .all(|(cells, digits)| {
                cells
                    .iter()
                    .zip(digits.iter())
                    .all(|(cell, &d)| cell.value != 0 && cell.value == d)
            })
    }

    fn editable(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.grid.cell_mut(row, col).filter(|cell| !cell.is_fixed)
    }
}

/// Sudoku with generated puzzles, a mistake counter and a hint budget.
///
/// While playing, an attached scheduler advances the round clock once per
/// second; without one the host calls [`SudokuGame::tick_clock`].
pub struct SudokuGame {
    session: Session<SudokuBoard>,
    rng: GameRng,
    difficulty: Difficulty,
    elapsed: Arc<AtomicU64>,
    scheduler: Option<Arc<dyn Scheduler>>,
    timer: Option<TaskHandle>,
}

/// Builder for [`SudokuGame`].
#[derive(Default)]
pub struct SudokuGameBuilder {
    config: SudokuConfig,
    store: Option<Arc<dyn HighScoreStore>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl SudokuGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: SudokuConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn HighScoreStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn build(self) -> SudokuGame {
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let difficulty = self.config.difficulty;
        SudokuGame {
            session: Session::new(
                ScoreKeeper::new(SUDOKU_SLUG, store),
                SudokuBoard::empty(difficulty),
            ),
            rng: GameRng::from_seed_or_entropy(self.config.seed),
            difficulty,
            elapsed: Arc::new(AtomicU64::new(0)),
            scheduler: self.scheduler,
            timer: None,
        }
    }
}

impl Default for SudokuGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SudokuGame {
    /// Medium difficulty, in-memory store, no scheduler.
    pub fn new() -> Self {
        SudokuGameBuilder::new().build()
    }

    pub fn builder() -> SudokuGameBuilder {
        SudokuGameBuilder::new()
    }

    /// Start a round at the given difficulty.
    pub fn start_with(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.start();
    }

    /// Difficulty the next `start()` will use.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Install a prepared puzzle and start playing it.
    ///
    /// A puzzle with no empty cell is already solved and ends at once.
    pub fn load(&mut self, puzzle: &Puzzle) {
        self.difficulty = puzzle.difficulty();
        self.session.install(SudokuBoard::from_puzzle(puzzle));
        self.restart_clock();
        if self.session.data().is_complete() {
            let score = self.final_score();
            self.session.scores_mut().set(score);
            self.end("solved");
        }
    }

    /// Write `value` into a cell; `0` clears it.
    ///
    /// Returns false when not playing, when the coordinates or value are out
    /// of range, or when the cell is a fixed given.
    pub fn place_number(&mut self, row: usize, col: usize, value: u8) -> bool {
        if !self.session.is_playing() || value > 9 {
            return false;
        }

        let board = self.session.data_mut();
        let expected = match board.solution.get(row).and_then(|r| r.get(col)) {
            Some(&d) => d,
            None => return false,
        };
        let Some(cell) = board.editable(row, col) else {
            return false;
        };

        cell.value = value;
        cell.notes.clear();
        cell.is_error = value != 0 && value != expected;

        if cell.is_error {
            board.mistakes += 1;
            let (mistakes, limit) = (board.mistakes, board.difficulty.mistake_limit());
            trace!(row, col, value, mistakes, "wrong number");
            if limit.is_some_and(|limit| mistakes >= limit) {
                self.end("mistakes");
            }
            return true;
        }

        if self.session.data().is_complete() {
            let score = self.final_score();
            self.session.scores_mut().set(score);
            self.end("solved");
        }
        true
    }

    /// Empty a cell. False on fixed cells or when not playing.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> bool {
        if !self.session.is_playing() {
            return false;
        }
        match self.session.data_mut().editable(row, col) {
            Some(cell) => {
                cell.value = 0;
                cell.is_error = false;
                cell.notes.clear();
                true
            }
            None => false,
        }
    }

    /// Flip a pencil mark. False on fixed cells, digits outside 1..=9, or
    /// when not playing.
    pub fn toggle_note(&mut self, row: usize, col: usize, value: u8) -> bool {
        if !self.session.is_playing() || !(1..=9).contains(&value) {
            return false;
        }
        match self.session.data_mut().editable(row, col) {
            Some(cell) => {
                cell.notes.toggle(value);
                true
            }
            None => false,
        }
    }

    /// Sudoku rule check for the current grid, independent of the solution.
    #[must_use]
    pub fn is_valid_move(&self, row: usize, col: usize, value: u8) -> bool {
        self.session.data().grid.is_valid_move(row, col, value)
    }

    /// Reveal the solution value of the first empty cell.
    ///
    /// Spends one hint. `None` when the budget is exhausted, nothing is
    /// empty, or the game is not being played.
    pub fn get_hint(&mut self) -> Option<Hint> {
        if !self.session.is_playing() {
            return None;
        }
        let board = self.session.data_mut();
        if board.hints_remaining == 0 {
            return None;
        }
        let (row, col) = board.grid.empty_cells().next()?;
        board.hints_remaining -= 1;
        Some(Hint {
            row,
            col,
            value: board.solution[row][col],
        })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.data().is_complete()
    }

    /// Advance the round clock by one second. Ignored unless playing.
    pub fn tick_clock(&mut self) {
        if self.session.is_playing() {
            self.elapsed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Seconds played this round.
    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.session.data().grid.cell(row, col).copied()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.session.data().grid
    }

    #[must_use]
    pub fn solution(&self) -> &Digits {
        &self.session.data().solution
    }

    #[must_use]
    pub fn mistakes(&self) -> u32 {
        self.session.data().mistakes
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.session.data().hints_remaining
    }

    /// Difficulty of the current round (or of the next one when not started).
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn given_count(&self) -> usize {
        self.session.data().grid.given_count()
    }

    fn final_score(&self) -> u32 {
        let elapsed = i64::try_from(self.elapsed()).unwrap_or(i64::MAX);
        let mistakes = i64::from(self.mistakes());
        let score = BASE_SCORE
            .saturating_sub(elapsed)
            .saturating_sub(mistakes * MISTAKE_PENALTY);
        u32::try_from(score.max(0)).unwrap_or(0)
    }

    fn end(&mut self, reason: &str) {
        self.timer = None;
        self.session.finish(reason);
    }

    fn restart_clock(&mut self) {
        self.elapsed.store(0, Ordering::Relaxed);
        self.arm_clock();
    }

    fn arm_clock(&mut self) {
        self.timer = None;
        let Some(scheduler) = &self.scheduler else {
            return;
        };
        let elapsed = Arc::clone(&self.elapsed);
        self.timer = Some(scheduler.schedule(
            CLOCK_PERIOD,
            Box::new(move || {
                elapsed.fetch_add(1, Ordering::Relaxed);
            }),
        ));
    }
}

impl Game for SudokuGame {
    type Snapshot = SudokuBoard;

    fn slug(&self) -> &'static str {
        SUDOKU_SLUG
    }

    fn state(&self) -> GameState {
        self.session.state()
    }

    fn score(&self) -> u32 {
        self.session.scores().score()
    }

    fn high_score(&self) -> u32 {
        self.session.scores().high_score()
    }

    fn start(&mut self) {
        let (difficulty, rng) = (self.difficulty, &mut self.rng);
        let started = self.session.begin(|| {
            let mut round = rng.fork();
            SudokuBoard::from_puzzle(&Puzzle::generate(difficulty, &mut round))
        });
        if started {
            self.restart_clock();
        }
    }

    fn pause(&mut self) {
        if self.session.pause() {
            self.timer = None;
        }
    }

    fn resume(&mut self) {
        if self.session.resume() {
            self.arm_clock();
        }
    }

    fn reset(&mut self) {
        self.timer = None;
        self.elapsed.store(0, Ordering::Relaxed);
        self.session.reset(SudokuBoard::empty(self.difficulty));
    }

    fn snapshot(&self) -> SudokuBoard {
        self.session.data().clone()
    }
}

impl std::fmt::Debug for SudokuGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SudokuGame")
            .field("state", &self.session.state())
            .field("scores", self.session.scores())
            .field("difficulty", &self.difficulty)
            .field("elapsed", &self.elapsed())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(difficulty: Difficulty) -> SudokuGame {
        let mut game = SudokuGame::builder()
            .config(SudokuConfig::default().with_seed(21))
            .build();
        game.start_with(difficulty);
        game
    }

    fn first_open(game: &SudokuGame) -> (usize, usize) {
        game.grid().empty_cells().next().unwrap()
    }

    #[test]
    fn test_ready_board_is_not_complete() {
        let game = SudokuGame::new();
        assert_eq!(game.state(), GameState::Ready);
        assert!(!game.is_complete());
        assert!(!SudokuGame::new().cell(0, 0).unwrap().is_fixed);
    }

    #[test]
    fn test_wrong_number_counts_mistake() {
        let mut game = started(Difficulty::Easy);
        let (r, c) = first_open(&game);
        let wrong = game.solution()[r][c] % 9 + 1;

        assert!(game.place_number(r, c, wrong));
        assert!(game.cell(r, c).unwrap().is_error);
        assert_eq!(game.mistakes(), 1);

        assert!(game.place_number(r, c, 0));
        let cell = game.cell(r, c).unwrap();
        assert_eq!(cell.value, 0);
        assert!(!cell.is_error);
        assert_eq!(game.mistakes(), 1);
    }

    #[test]
    fn test_hard_mode_ends_after_three_mistakes() {
        let mut game = started(Difficulty::Hard);
        let (r, c) = first_open(&game);
        let wrong = game.solution()[r][c] % 9 + 1;

        for _ in 0..2 {
            game.place_number(r, c, wrong);
            assert_eq!(game.state(), GameState::Playing);
        }
        game.place_number(r, c, wrong);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_final_score_formula() {
        let mut game = started(Difficulty::Easy);
        for _ in 0..125 {
            game.tick_clock();
        }
        let (r, c) = first_open(&game);
        game.place_number(r, c, game.solution()[r][c] % 9 + 1);
        assert_eq!(game.final_score(), 1000 - 125 - 100);

        for _ in 0..2000 {
            game.tick_clock();
        }
        assert_eq!(game.final_score(), 0);
    }

    #[test]
    fn test_notes_cleared_by_placement() {
        let mut game = started(Difficulty::Medium);
        let (r, c) = first_open(&game);
        assert!(game.toggle_note(r, c, 3));
        assert!(game.toggle_note(r, c, 7));
        assert_eq!(game.cell(r, c).unwrap().notes.len(), 2);
        assert!(!game.toggle_note(r, c, 0));

        game.place_number(r, c, game.solution()[r][c]);
        assert!(game.cell(r, c).unwrap().notes.is_empty());
    }
}
