//! High score persistence
//!
//! The engine only needs a get/set store for a single number. The file store
//! keeps it as JSON in the platform data directory; the memory store is for
//! tests and sessions that should not touch the disk.

pub mod high_score;

pub use high_score::{FileStore, HighScoreStore, MemoryStore, StoreError};
