//! Snake simulator with scheduler-driven autoplay.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

use super::board::{Direction, Position, SnakeBoard, StepOutcome};
use crate::core::{Game, GameRng, GameState, ScoreKeeper, Session, SnakeConfig};
use crate::schedule::{Scheduler, TaskHandle};
use crate::storage::{HighScoreStore, MemoryStore};

/// Key the Snake high score is stored under.
pub const SNAKE_SLUG: &str = "snake-highscore";

/// Mutable part of the game, shared with the tick callback.
struct SnakeCore {
    session: Session<SnakeBoard>,
    rng: GameRng,
    config: SnakeConfig,
    ticker: Option<TaskHandle>,
}

impl SnakeCore {
    fn fresh_board(config: &SnakeConfig, rng: &mut GameRng) -> SnakeBoard {
        let mut round = rng.fork();
        SnakeBoard::new(config.width, config.height, &mut round)
    }

    fn step(&mut self) -> StepOutcome {
        if !self.session.is_playing() {
            return StepOutcome::Ignored;
        }

        let outcome = self.session.data_mut().advance(&mut self.rng);
        trace!(?outcome, head = ?self.session.data().head(), "snake tick");

        match outcome {
            StepOutcome::Ate => self.session.scores_mut().add(self.config.food_points),
            StepOutcome::Filled => {
                self.session.scores_mut().add(self.config.food_points);
                self.end(outcome);
            }
            StepOutcome::HitWall | StepOutcome::HitSelf => self.end(outcome),
            StepOutcome::Moved | StepOutcome::Ignored => {}
        }
        outcome
    }

    fn end(&mut self, outcome: StepOutcome) {
        let reason = match outcome {
            StepOutcome::HitWall => "wall",
            StepOutcome::HitSelf => "self",
            _ => "filled",
        };
        self.session.finish(reason);
        self.ticker = None;
    }
}

/// Snake: a body crawling across a bounded grid, growing on food.
///
/// With a scheduler attached, `start`/`resume` arm a periodic tick that calls
/// [`SnakeGame::step`]; `pause`, `reset` and game over disarm it. Without
/// one, the host calls `step` itself.
///
/// ```
/// use arcade_core::core::{Game, GameState, SnakeConfig};
/// use arcade_core::games::snake::SnakeGame;
///
/// let mut game = SnakeGame::builder()
///     .config(SnakeConfig::default().with_seed(7))
///     .build();
/// game.start();
/// assert_eq!(game.state(), GameState::Playing);
/// assert_eq!(game.len(), 3);
///
/// let before = game.head();
/// game.step();
/// assert_eq!(game.head().manhattan(before), 1);
/// ```
pub struct SnakeGame {
    core: Arc<Mutex<SnakeCore>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

/// Builder for [`SnakeGame`].
#[derive(Default)]
pub struct SnakeGameBuilder {
    config: SnakeConfig,
    store: Option<Arc<dyn HighScoreStore>>,
    scheduler: Option<Arc<dyn Scheduler>>,
}

impl SnakeGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: SnakeConfig) -> Self {
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

    pub fn build(self) -> SnakeGame {
        let mut config = self.config;
        config.width = config.width.max(4);
        config.height = config.height.max(1);

        let store = self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()));
        let mut rng = GameRng::from_seed_or_entropy(config.seed);
        let board = SnakeCore::fresh_board(&config, &mut rng);
        let core = SnakeCore {
            session: Session::new(ScoreKeeper::new(SNAKE_SLUG, store), board),
            rng,
            config,
            ticker: None,
        };

        SnakeGame {
            core: Arc::new(Mutex::new(core)),
            scheduler: self.scheduler,
        }
    }
}

impl Default for SnakeGame {
    fn default() -> Self {
        Self::new()
    }
}

impl SnakeGame {
    /// Default-sized game with an in-memory store and no scheduler.
    pub fn new() -> Self {
        SnakeGameBuilder::new().build()
    }

    pub fn builder() -> SnakeGameBuilder {
        SnakeGameBuilder::new()
    }

    /// Advance one tick. This is what the scheduler calls.
    pub fn step(&mut self) -> StepOutcome {
        self.core.lock().step()
    }

    /// Buffer a heading for the next tick.
    ///
    /// Returns false if not playing or if `direction` reverses the current
    /// heading.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        let mut core = self.core.lock();
        core.session.is_playing() && core.session.data_mut().turn(direction)
    }

    /// Change the tick period. Rearms the tick if playing.
    pub fn set_speed(&mut self, period: Duration) {
        let playing = {
            let mut core = self.core.lock();
            core.config.tick_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1);
            core.session.is_playing()
        };
        if playing {
            self.arm();
        }
    }

    /// Install a prepared board and start playing on it.
    pub fn restore(&mut self, board: SnakeBoard) {
        {
            let mut core = self.core.lock();
            core.ticker = None;
            core.session.install(board);
        }
        self.arm();
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        self.core.lock().config.tick_period()
    }

    #[must_use]
    pub fn config(&self) -> SnakeConfig {
        self.core.lock().config.clone()
    }

    /// Body segments, head first.
    #[must_use]
    pub fn snake(&self) -> Vec<Position> {
        self.core.lock().session.data().body().iter().copied().collect()
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.core.lock().session.data().head()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.core.lock().session.data().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.core.lock().session.data().food()
    }

    /// Committed heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.core.lock().session.data().direction()
    }

    /// True while a tick task is armed.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.core
            .lock()
            .ticker
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }

    fn arm(&self) {
        let Some(scheduler) = &self.scheduler else {
            return;
        };
        let period = self.tick_period();
        let core: Weak<Mutex<SnakeCore>> = Arc::downgrade(&self.core);
        let handle = scheduler.schedule(
            period,
            Box::new(move || {
                if let Some(core) = core.upgrade() {
                    core.lock().step();
                }
            }),
        );
        // Replacing the old handle cancels it.
        self.core.lock().ticker = Some(handle);
    }

    fn disarm(&self) {
        self.core.lock().ticker = None;
    }
}

impl Game for SnakeGame {
    type Snapshot = SnakeBoard;

    fn slug(&self) -> &'static str {
        SNAKE_SLUG
    }

    fn state(&self) -> GameState {
        self.core.lock().session.state()
    }

    fn score(&self) -> u32 {
        self.core.lock().session.scores().score()
    }

    fn high_score(&self) -> u32 {
        self.core.lock().session.scores().high_score()
    }

    fn start(&mut self) {
        let started = {
            let mut guard = self.core.lock();
            let core = &mut *guard;
            let (config, rng) = (&core.config, &mut core.rng);
            core.session.begin(|| SnakeCore::fresh_board(config, rng))
        };
        if started {
            self.arm();
        }
    }

    fn pause(&mut self) {
        if self.core.lock().session.pause() {
            self.disarm();
        }
    }

    fn resume(&mut self) {
        if self.core.lock().session.resume() {
            self.arm();
        }
    }

    fn reset(&mut self) {
        let mut guard = self.core.lock();
        let core = &mut *guard;
        core.ticker = None;
        let board = SnakeCore::fresh_board(&core.config, &mut core.rng);
        core.session.reset(board);
    }

    fn snapshot(&self) -> SnakeBoard {
        self.core.lock().session.data().clone()
    }
}

impl std::fmt::Debug for SnakeGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.core.lock();
        f.debug_struct("SnakeGame")
            .field("state", &core.session.state())
            .field("scores", core.session.scores())
            .field("board", core.session.data())
            .field("ticking", &core.ticker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> SnakeGame {
        SnakeGame::builder()
            .config(SnakeConfig::default().with_seed(11))
            .build()
    }

    #[test]
    fn test_step_ignored_before_start() {
        let mut g = game();
        assert_eq!(g.step(), StepOutcome::Ignored);
        assert_eq!(g.state(), GameState::Ready);
    }

    #[test]
    fn test_start_builds_initial_snake() {
        let mut g = game();
        g.start();
        assert_eq!(g.state(), GameState::Playing);
        assert_eq!(g.snake().len(), 3);
        assert_eq!(g.head(), Position::new(10, 10));
        assert_eq!(g.direction(), Direction::Right);
        assert!(!g.is_ticking());
    }

    #[test]
    fn test_change_direction_requires_playing() {
        let mut g = game();
        assert!(!g.change_direction(Direction::Up));
        g.start();
        assert!(g.change_direction(Direction::Up));
        g.pause();
        assert!(!g.change_direction(Direction::Down));
    }

    #[test]
    fn test_set_speed_updates_period() {
        let mut g = game();
        g.set_speed(Duration::from_millis(90));
        assert_eq!(g.tick_period(), Duration::from_millis(90));

        g.set_speed(Duration::MAX);
        assert_eq!(g.config().tick_ms, u64::MAX);
        g.set_speed(Duration::from_micros(10));
        assert_eq!(g.tick_period(), Duration::from_millis(1));
    }
}
