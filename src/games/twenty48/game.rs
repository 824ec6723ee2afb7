//! 2048 simulator: moves, spawning, win flag and single-level undo.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::board::{Board, Direction};
use crate::core::{Game, GameRng, GameState, ScoreKeeper, Session, TwentyFortyEightConfig};
use crate::storage::{HighScoreStore, MemoryStore};

/// Key the 2048 high score is stored under.
pub const TWENTY48_SLUG: &str = "2048-highscore";

/// Tiles placed at the start of a round.
pub const STARTING_TILES: usize = 2;

/// Position before the most recent move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoSnapshot {
    pub board: Board,
    pub score: u32,
}

/// 2048 game data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRound {
    board: Board,
    previous: Option<UndoSnapshot>,
    won: bool,
    continuing: bool,
}

impl TileRound {
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn previous(&self) -> Option<&UndoSnapshot> {
        self.previous.as_ref()
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.won
    }
}

/// 2048: slide tiles, merge equal pairs, reach the win tile.
///
/// Reaching the win tile sets a flag but does not end the round; play goes
/// on until no slide can change the board.
///
/// ```
/// use arcade_core::core::{Game, TwentyFortyEightConfig};
/// use arcade_core::games::twenty48::{Board, Direction, TwentyFortyEightGame};
///
/// let mut game = TwentyFortyEightGame::builder()
///     .config(TwentyFortyEightConfig::default().with_seed(1))
///     .build();
/// game.load(Board::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
///
/// assert!(game.move_tiles(Direction::Left));
/// assert_eq!(game.board().get(0, 0), Some(4));
/// assert_eq!(game.score(), 4);
/// ```
#[derive(Debug)]
pub struct TwentyFortyEightGame {
    session: Session<TileRound>,
    rng: GameRng,
    config: TwentyFortyEightConfig,
}

/// Builder for [`TwentyFortyEightGame`].
#[derive(Default)]
pub struct TwentyFortyEightGameBuilder {
    config: TwentyFortyEightConfig,
    store: Option<Arc<dyn HighScoreStore>>,
}

impl TwentyFortyEightGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: TwentyFortyEightConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn HighScoreStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> TwentyFortyEightGame {
        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        TwentyFortyEightGame {
            session: Session::new(ScoreKeeper::new(TWENTY48_SLUG, store), TileRound::default()),
            rng: GameRng::from_seed_or_entropy(self.config.seed),
            config: self.config,
        }
    }
}

impl Default for TwentyFortyEightGame {
    fn default() -> Self {
        Self::new()
    }
}

impl TwentyFortyEightGame {
    pub fn new() -> Self {
        TwentyFortyEightGameBuilder::new().build()
    }

    pub fn builder() -> TwentyFortyEightGameBuilder {
        TwentyFortyEightGameBuilder::new()
    }

    /// Slide all tiles in `direction`.
    ///
    /// Returns true iff the board changed. A changed board gets one new
    /// tile, may set the win flag, and ends the round if no move remains.
    /// The pre-move position becomes the undo snapshot.
    pub fn move_tiles(&mut self, direction: Direction) -> bool {
        if !self.session.is_playing() {
            return false;
        }

        let score = self.session.scores().score();
        let round = self.session.data_mut();
        let before = round.board;
        let outcome = round.board.slide(direction);
        if !outcome.changed {
            return false;
        }

        round.previous = Some(UndoSnapshot {
            board: before,
            score,
        });
        round
            .board
            .add_random_tile(&mut self.rng, self.config.four_probability);

        let reached_win = !round.won && round.board.max_tile() >= self.config.win_tile;
        if reached_win {
            round.won = true;
        }
        let stuck = !round.board.has_moves();

        self.session.scores_mut().add(outcome.gained);
        trace!(?direction, gained = outcome.gained, "tiles moved");
        if reached_win {
            debug!(tile = self.config.win_tile, "win tile reached");
        }
        if stuck {
            self.session.finish("no moves");
        }
        true
    }

    /// Restore the position before the last move.
    ///
    /// Only one level is kept; a second undo without a move in between
    /// returns false.
    pub fn undo(&mut self) -> bool {
        if !self.session.is_playing() {
            return false;
        }
        let Some(previous) = self.session.data_mut().previous.take() else {
            return false;
        };
        self.session.data_mut().board = previous.board;
        self.session.scores_mut().set(previous.score);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.session.data().previous.is_some()
    }

    /// True iff the board is full and no neighbours are equal.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        !self.session.data().board.has_moves()
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.session.data().won
    }

    /// Acknowledge the win and keep playing. Ignored before a win.
    pub fn continue_after_win(&mut self) -> bool {
        let round = self.session.data_mut();
        if !round.won {
            return false;
        }
        round.continuing = true;
        true
    }

    #[must_use]
    pub fn is_continuing(&self) -> bool {
        self.session.data().continuing
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.session.data().board
    }

    #[must_use]
    pub fn config(&self) -> &TwentyFortyEightConfig {
        &self.config
    }

    /// Install a position and start playing from it.
    pub fn load(&mut self, board: Board, score: u32) {
        let won = board.max_tile() >= self.config.win_tile;
        self.session.install(TileRound {
            board,
            previous: None,
            won,
            continuing: false,
        });
        self.session.scores_mut().set(score);
        if !board.has_moves() {
            self.session.finish("no moves");
        }
    }

    fn fresh_round(rng: &mut GameRng, four_probability: f64) -> TileRound {
        let mut round = TileRound::default();
        for _ in 0..STARTING_TILES {
            round.board.add_random_tile(rng, four_probability);
        }
        round
    }
}

impl Game for TwentyFortyEightGame {
    type Snapshot = TileRound;

    fn slug(&self) -> &'static str {
        TWENTY48_SLUG
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
        let (rng, p) = (&mut self.rng, self.config.four_probability);
        self.session.begin(|| Self::fresh_round(&mut rng.fork(), p));
    }

    fn pause(&mut self) {
        self.session.pause();
    }

    fn resume(&mut self) {
        self.session.resume();
    }

    fn reset(&mut self) {
        self.session.reset(TileRound::default());
    }

    fn snapshot(&self) -> TileRound {
        self.session.data().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> TwentyFortyEightGame {
        TwentyFortyEightGame::builder()
            .config(TwentyFortyEightConfig::default().with_seed(99))
            .build()
    }

    #[test]
    fn test_start_places_two_tiles() {
        let mut g = game();
        g.start();
        assert_eq!(g.state(), GameState::Playing);
        assert_eq!(g.board().empty_cells().len(), 14);
        assert!(g.board().rows().iter().flatten().all(|&v| v == 0 || v == 2 || v == 4));
    }

    #[test]
    fn test_move_ignored_when_not_playing() {
        let mut g = game();
        assert!(!g.move_tiles(Direction::Left));
        g.start();
        g.pause();
        assert!(!g.move_tiles(Direction::Left));
        assert!(!g.undo());
    }

    #[test]
    fn test_unchanged_move_keeps_undo_slot_empty() {
        let mut g = game();
        g.load(Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
        assert!(!g.move_tiles(Direction::Left));
        assert!(!g.can_undo());
        assert_eq!(g.board().empty_cells().len(), 15);
    }

    #[test]
    fn test_continue_after_win() {
        let mut g = game();
        g.load(Board::from_rows([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
        assert!(!g.continue_after_win());
        g.move_tiles(Direction::Left);
        assert!(g.has_won());
        assert!(g.continue_after_win());
        assert!(g.is_continuing());
        assert_eq!(g.state(), GameState::Playing);
    }

    #[test]
    fn test_reset_clears_board() {
        let mut g = game();
        g.start();
        g.move_tiles(Direction::Up);
        g.move_tiles(Direction::Left);
        g.reset();
        assert_eq!(g.state(), GameState::Ready);
        assert_eq!(g.score(), 0);
        assert_eq!(*g.board(), Board::default());
        assert!(!g.can_undo());
        assert!(!g.has_won());
    }
}
