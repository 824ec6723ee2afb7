//! Lifecycle contract shared by every simulator.
//!
//! `Game` is the host-facing trait; `Session` is the bookkeeping each
//! simulator embeds to implement it. All transitions are total: a call that
//! is illegal in the current state returns `false` and changes nothing.

use tracing::debug;

use super::score::ScoreKeeper;
use super::state::GameState;

/// Host-facing lifecycle of a single-player simulator.
///
/// ## Implementation Notes
///
/// - `start`: no-op while playing, otherwise begins a fresh round
/// - `pause` / `resume`: only from `Playing` / `Paused`
/// - `reset`: always returns to `Ready` with score 0 and fresh data
/// - `snapshot`: owned copy of the game data for rendering or replay
pub trait Game {
    /// Owned view of the game data.
    type Snapshot;

    /// Stable key the high score is persisted under.
    fn slug(&self) -> &'static str;

    fn state(&self) -> GameState;

    fn score(&self) -> u32;

    fn high_score(&self) -> u32;

    /// Begin a round. Ignored while already playing.
    fn start(&mut self);

    /// Suspend the round. Ignored unless playing.
    fn pause(&mut self);

    /// Continue a paused round. Ignored unless paused.
    fn resume(&mut self);

    /// Abandon the round and return to `Ready`.
    fn reset(&mut self);

    /// Copy of the current game data.
    fn snapshot(&self) -> Self::Snapshot;
}

/// State, score and data of one simulator instance.
#[derive(Clone, Debug)]
pub struct Session<D> {
    state: GameState,
    scores: ScoreKeeper,
    data: D,
}

impl<D> Session<D> {
    /// New session in `Ready`.
    pub fn new(scores: ScoreKeeper, data: D) -> Self {
        Self {
            state: GameState::Ready,
            scores,
            data,
        }
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state.is_active()
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreKeeper {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreKeeper {
        &mut self.scores
    }

    #[must_use]
    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Start a round with data from `init`. `init` is not called while playing.
    pub fn begin(&mut self, init: impl FnOnce() -> D) -> bool {
        if self.state == GameState::Playing {
            return false;
        }
        self.install(init());
        true
    }

    /// Enter `Playing` with the given data and a zero score.
    pub fn install(&mut self, data: D) {
        self.data = data;
        self.scores.clear();
        self.state = GameState::Playing;
        debug!(slug = self.scores.slug(), "round started");
    }

    pub fn pause(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.state = GameState::Paused;
        debug!(slug = self.scores.slug(), "paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        self.state = GameState::Playing;
        debug!(slug = self.scores.slug(), "resumed");
        true
    }

    /// Return to `Ready` with a zero score and fresh data.
    pub fn reset(&mut self, data: D) {
        self.data = data;
        self.scores.clear();
        self.state = GameState::Ready;
        debug!(slug = self.scores.slug(), "reset");
    }

    /// End the round. Ignored if it already ended.
    pub fn finish(&mut self, reason: &str) -> bool {
        if self.state == GameState::GameOver {
            return false;
        }
        self.state = GameState::GameOver;
        self.scores.record();
        debug!(
            slug = self.scores.slug(),
            reason,
            score = self.scores.score(),
            "game over"
        );
        true
    }
}
