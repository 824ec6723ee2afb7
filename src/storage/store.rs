//! Key-value high-score store and its in-memory implementation.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::StoreError;

/// Key-value collaborator that persists high scores.
///
/// Keys are stable per-game slugs (e.g. `"snake-highscore"`). A missing key
/// reads as `Ok(None)`. Implementations use interior mutability so one store
/// can be shared by several simulators.
pub trait HighScoreStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError>;

    /// Write `value` under `key`.
    fn set(&self, key: &str, value: u32) -> Result<(), StoreError>;
}

/// Process-local store. The default for simulators built without one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<FxHashMap<String, u32>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, u32)>,
        K: Into<String>,
    {
        let values = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Number of keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// True if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }
}

impl HighScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.values.lock().get(key).copied())
    }

    fn set(&self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("snake-highscore").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("2048-highscore", 512).unwrap();
        store.set("2048-highscore", 1024).unwrap();
        assert_eq!(store.get("2048-highscore").unwrap(), Some(1024));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_with_entries() {
        let store = MemoryStore::with_entries([("snake-highscore", 90), ("sudoku-highscore", 700)]);
        assert_eq!(store.get("snake-highscore").unwrap(), Some(90));
        assert_eq!(store.get("sudoku-highscore").unwrap(), Some(700));
    }
}
