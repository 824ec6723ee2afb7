//! File-backed store: the whole table is one bincode-encoded map.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::{HighScoreStore, StoreError};

type Table = FxHashMap<String, u32>;

/// High-score store persisted to a single file.
///
/// The table is read once on open and rewritten on every `set`. Writes go to
/// a sibling temp file which is then renamed over the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    table: Mutex<Table>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file is treated as an empty table.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let table = read_table(&path)?;
        debug!(path = %path.display(), entries = table.len(), "opened high-score file");
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.table.lock().get(key).copied())
    }

    fn set(&self, key: &str, value: u32) -> Result<(), StoreError> {
        let mut table = self.table.lock();
        table.insert(key.to_string(), value);
        write_table(&self.path, &table)
    }
}

fn read_table(path: &Path) -> Result<Table, StoreError> {
    match fs::read(path) {
        Ok(bytes) => bincode::deserialize(&bytes).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Table::default()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_table(path: &Path, table: &Table) -> Result<(), StoreError> {
    let bytes = bincode::serialize(table).map_err(StoreError::Encode)?;
    let tmp = path.with_extension("tmp");
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, bytes).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("scores.bin")).unwrap();
        assert_eq!(store.get("snake-highscore").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.bin");

        let store = FileStore::open(&path).unwrap();
        store.set("snake-highscore", 120).unwrap();
        store.set("2048-highscore", 4096).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("snake-highscore").unwrap(), Some(120));
        assert_eq!(reopened.get("2048-highscore").unwrap(), Some(4096));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.bin");
        fs::write(&path, [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]).unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
