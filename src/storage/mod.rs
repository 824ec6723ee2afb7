//! High-score persistence.
//!
//! Simulators never talk to a storage medium directly. They hold an
//! `Arc<dyn HighScoreStore>` and read/write a single `u32` under their slug.
//!
//! - `MemoryStore`: process-local, the default
//! - `FileStore`: one bincode-encoded file for all games

mod error;
mod file;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use store::{HighScoreStore, MemoryStore};
