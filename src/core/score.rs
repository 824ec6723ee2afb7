//! Score and high-score bookkeeping.

use std::sync::Arc;

use tracing::{info, warn};

use crate::storage::{HighScoreStore, MemoryStore};

/// Current score plus a persisted, monotonically non-decreasing high score.
///
/// The high score is loaded from the store on construction and written back
/// every time the current score exceeds it. Store failures are logged and
/// otherwise ignored: the in-memory high score stays authoritative.
#[derive(Clone)]
pub struct ScoreKeeper {
    slug: &'static str,
    score: u32,
    high_score: u32,
    store: Arc<dyn HighScoreStore>,
}

impl ScoreKeeper {
    /// Create a keeper for `slug`, loading the stored high score.
    pub fn new(slug: &'static str, store: Arc<dyn HighScoreStore>) -> Self {
        let high_score = match store.get(slug) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                warn!(slug, error = %e, "failed to load high score");
                0
            }
        };
        Self {
            slug,
            score: 0,
            high_score,
            store,
        }
    }

    /// Keeper backed by a fresh in-memory store.
    pub fn in_memory(slug: &'static str) -> Self {
        Self::new(slug, Arc::new(MemoryStore::new()))
    }

    /// Stable key the high score is stored under.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        self.slug
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Add points to the current score.
    pub fn add(&mut self, points: u32) {
        self.set(self.score.saturating_add(points));
    }

    /// Overwrite the current score.
    pub fn set(&mut self, value: u32) {
        self.score = value;
        self.record();
    }

    /// Zero the current score. The high score is untouched.
    pub fn clear(&mut self) {
        self.score = 0;
    }

    /// Raise and persist the high score if the current score beats it.
    ///
    /// Returns true if a new high score was recorded.
    pub fn record(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        match self.store.set(self.slug, self.high_score) {
            Ok(()) => info!(slug = self.slug, high_score = self.high_score, "new high score"),
            Err(e) => warn!(slug = self.slug, error = %e, "failed to save high score"),
        }
        true
    }
}

impl std::fmt::Debug for ScoreKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreKeeper")
            .field("slug", &self.slug)
            .field("score", &self.score)
            .field("high_score", &self.high_score)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Encode(Box::new(bincode::ErrorKind::SizeLimit)))
        }

        fn set(&self, _key: &str, _value: u32) -> Result<(), StoreError> {
            Err(StoreError::Encode(Box::new(bincode::ErrorKind::SizeLimit)))
        }
    }

    #[test]
    fn test_loads_existing_high_score() {
        let store = Arc::new(MemoryStore::with_entries([("snake-highscore", 70)]));
        let keeper = ScoreKeeper::new("snake-highscore", store);
        assert_eq!(keeper.score(), 0);
        assert_eq!(keeper.high_score(), 70);
    }

    #[test]
    fn test_high_score_persisted_when_exceeded() {
        let store = Arc::new(MemoryStore::with_entries([("snake-highscore", 20)]));
        let mut keeper = ScoreKeeper::new("snake-highscore", store.clone());

        keeper.add(10);
        assert_eq!(keeper.high_score(), 20);
        assert_eq!(store.get("snake-highscore").unwrap(), Some(20));

        keeper.add(20);
        assert_eq!(keeper.high_score(), 30);
        assert_eq!(store.get("snake-highscore").unwrap(), Some(30));
    }

    #[test]
    fn test_high_score_never_decreases() {
        let mut keeper = ScoreKeeper::in_memory("2048-highscore");
        keeper.set(500);
        keeper.clear();
        keeper.set(100);
        assert_eq!(keeper.score(), 100);
        assert_eq!(keeper.high_score(), 500);
    }

    #[test]
    fn test_store_failures_are_tolerated() {
        let mut keeper = ScoreKeeper::new("sudoku-highscore", Arc::new(BrokenStore));
        assert_eq!(keeper.high_score(), 0);
        keeper.set(800);
        assert_eq!(keeper.high_score(), 800);
    }
}
