use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Errors from loading or saving the high score
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not determine a data directory for the high score file")]
    NoDataDir,

    #[error("failed to access high score file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("high score file {path:?} is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Get/set store for the best score
pub trait HighScoreStore {
    /// Stored high score, 0 if none was ever saved
    fn load_high_score(&self) -> Result<u32, StoreError>;

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// On-disk layout of the high score file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// High score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data dir>/grid_snake/high_score.json`, using the
    /// platform conventions from the `directories` crate
    pub fn default_location() -> Result<Self, StoreError> {
        let project_dirs =
            ProjectDirs::from("", "", "grid_snake").ok_or(StoreError::NoDataDir)?;

        Ok(Self::new(project_dirs.data_dir().join("high_score.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for FileStore {
    fn load_high_score(&self) -> Result<u32, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(self.io_error(err)),
        };

        let record: HighScoreRecord =
            serde_json::from_str(&json).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        Ok(record.high_score)
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let record = HighScoreRecord { high_score: score };
        let json = serde_json::to_string_pretty(&record).map_err(|source| {
            StoreError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, json).map_err(|err| self.io_error(err))
    }
}

/// In-memory store. Clones share the same slot, so a test can keep a handle
/// after giving the store away.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<MemorySlot>>,
}

#[derive(Debug, Default)]
struct MemorySlot {
    high_score: Option<u32>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `high_score`
    pub fn with_high_score(high_score: u32) -> Self {
        let store = Self::new();
        store.slot.borrow_mut().high_score = Some(high_score);
        store
    }

    /// Number of saves issued so far
    pub fn save_count(&self) -> usize {
        self.slot.borrow().saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load_high_score(&self) -> Result<u32, StoreError> {
        Ok(self.slot.borrow().high_score.unwrap_or(0))
    }

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError> {
        let mut slot = self.slot.borrow_mut();
        slot.high_score = Some(score);
        slot.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("high_score.json"));

        assert_eq!(store.load_high_score().unwrap(), 0);
    }

    #[test]
    fn test_round_trip_across_sessions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("high_score.json");

        let mut first = FileStore::new(&path);
        first.save_high_score(5).unwrap();

        let fresh = FileStore::new(&path);
        assert_eq!(fresh.load_high_score().unwrap(), 5);
    }

    #[test]
    fn test_malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.load_high_score(),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("high_score.json");

        FileStore::new(&path).save_high_score(12).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["high_score"], 12);
    }

    #[test]
    fn test_memory_store_shares_slot() {
        let store = MemoryStore::new();
        let mut handle = store.clone();

        assert_eq!(store.load_high_score().unwrap(), 0);
        handle.save_high_score(3).unwrap();

        assert_eq!(store.load_high_score().unwrap(), 3);
        assert_eq!(store.save_count(), 1);
    }
}
