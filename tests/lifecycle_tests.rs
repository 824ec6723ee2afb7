//! Lifecycle and persistence behaviour shared by every simulator.

use std::sync::Arc;

use arcade_core::core::{Difficulty, Game, GameState, SnakeConfig, SudokuConfig, TwentyFortyEightConfig};
use arcade_core::games::snake::{Direction, Position, SnakeBoard, SnakeGame};
use arcade_core::games::sudoku::{Puzzle, SudokuGame};
use arcade_core::games::twenty48::{Board, TwentyFortyEightGame};
use arcade_core::games::GameKind;
use arcade_core::storage::{FileStore, HighScoreStore, MemoryStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn snake(store: Arc<dyn HighScoreStore>) -> SnakeGame {
    SnakeGame::builder()
        .config(SnakeConfig::default().with_seed(1))
        .store(store)
        .build()
}

fn sudoku(store: Arc<dyn HighScoreStore>) -> SudokuGame {
    SudokuGame::builder()
        .config(SudokuConfig::default().with_seed(1))
        .store(store)
        .build()
}

fn twenty48(store: Arc<dyn HighScoreStore>) -> TwentyFortyEightGame {
    TwentyFortyEightGame::builder()
        .config(TwentyFortyEightConfig::default().with_seed(1))
        .store(store)
        .build()
}

/// Drive the state machine through every transition, including the ignored
/// ones.
fn check_transitions<G: Game>(game: &mut G) {
    assert_eq!(game.state(), GameState::Ready);
    assert_eq!(game.score(), 0);

    // Pause and resume are no-ops outside their source states
    game.pause();
    assert_eq!(game.state(), GameState::Ready);
    game.resume();
    assert_eq!(game.state(), GameState::Ready);

    game.start();
    assert_eq!(game.state(), GameState::Playing);
    game.resume();
    assert_eq!(game.state(), GameState::Playing);

    game.pause();
    assert_eq!(game.state(), GameState::Paused);
    game.pause();
    assert_eq!(game.state(), GameState::Paused);

    game.resume();
    assert_eq!(game.state(), GameState::Playing);

    game.reset();
    assert_eq!(game.state(), GameState::Ready);
    assert_eq!(game.score(), 0);
}

// =============================================================================
// State Machine Tests
// =============================================================================

#[test]
fn test_snake_transitions() {
    init_tracing();
    check_transitions(&mut snake(Arc::new(MemoryStore::new())));
}

#[test]
fn test_sudoku_transitions() {
    init_tracing();
    check_transitions(&mut sudoku(Arc::new(MemoryStore::new())));
}

#[test]
fn test_twenty48_transitions() {
    init_tracing();
    check_transitions(&mut twenty48(Arc::new(MemoryStore::new())));
}

#[test]
fn test_start_while_playing_keeps_round() {
    let mut game = twenty48(Arc::new(MemoryStore::new()));
    game.start();
    let round = game.snapshot();

    game.start();
    assert_eq!(game.snapshot(), round);
}

#[test]
fn test_reset_gives_fresh_data() {
    let mut game = sudoku(Arc::new(MemoryStore::new()));
    game.start();
    let (r, c) = game.grid().empty_cells().next().unwrap();
    game.toggle_note(r, c, 5);
    game.reset();

    game.start();
    assert_eq!(game.mistakes(), 0);
    assert!(game.grid().rows().iter().flatten().all(|cell| cell.notes.is_empty()));
}

#[test]
fn test_slugs_match_catalog() {
    let store: Arc<dyn HighScoreStore> = Arc::new(MemoryStore::new());
    assert_eq!(snake(store.clone()).slug(), GameKind::Snake.slug());
    assert_eq!(sudoku(store.clone()).slug(), GameKind::Sudoku.slug());
    assert_eq!(twenty48(store).slug(), GameKind::TwentyFortyEight.slug());
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_file_store_shared_by_all_games() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.bin");
    let store: Arc<dyn HighScoreStore> = Arc::new(FileStore::open(&path).unwrap());

    let mut s = snake(store.clone());
    s.restore(
        SnakeBoard::from_parts(
            20,
            20,
            [(5, 5), (4, 5), (3, 5)].into_iter().map(Position::from),
            Direction::Right,
            Some(Position::new(6, 5)),
        )
        .unwrap(),
    );
    s.step();
    assert_eq!(s.score(), 10);

    let mut t = twenty48(store.clone());
    t.load(Board::from_rows([[8, 8, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
    t.move_tiles(arcade_core::games::twenty48::Direction::Left);
    assert_eq!(t.score(), 16);

    let mut solution = [[0u8; 9]; 9];
    for (r, row) in solution.iter_mut().enumerate() {
        for (c, d) in row.iter_mut().enumerate() {
            *d = ((r * 3 + r / 3 + c) % 9 + 1) as u8;
        }
    }
    let mut givens = solution;
    givens[8][8] = 0;
    let mut u = sudoku(store);
    u.load(&Puzzle::from_digits(givens, solution, Difficulty::Medium).unwrap());
    u.place_number(8, 8, solution[8][8]);
    assert_eq!(u.state(), GameState::GameOver);
    assert_eq!(u.score(), 1000);

    // Fresh handle on the same file sees every game's entry
    let reopened = FileStore::open(&path).unwrap();
    assert_eq!(reopened.get(GameKind::Snake.slug()).unwrap(), Some(10));
    assert_eq!(reopened.get(GameKind::TwentyFortyEight.slug()).unwrap(), Some(16));
    assert_eq!(reopened.get(GameKind::Sudoku.slug()).unwrap(), Some(1000));

    let restarted = twenty48(Arc::new(reopened));
    assert_eq!(restarted.high_score(), 16);
}

#[test]
fn test_lower_score_does_not_overwrite() {
    let store = Arc::new(MemoryStore::with_entries([(GameKind::TwentyFortyEight.slug(), 100)]));
    let mut game = twenty48(store.clone());
    game.load(Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
    game.move_tiles(arcade_core::games::twenty48::Direction::Left);

    assert_eq!(game.score(), 4);
    assert_eq!(game.high_score(), 100);
    assert_eq!(store.get(GameKind::TwentyFortyEight.slug()).unwrap(), Some(100));
}

#[test]
fn test_reset_keeps_high_score() {
    let store = Arc::new(MemoryStore::new());
    let mut game = twenty48(store.clone());
    game.load(Board::from_rows([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
    game.move_tiles(arcade_core::games::twenty48::Direction::Left);
    game.reset();

    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), 8);
    assert_eq!(store.get(GameKind::TwentyFortyEight.slug()).unwrap(), Some(8));
}
