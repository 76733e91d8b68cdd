//! Progress persistence
//!
//! Features:
//! - Single named record holding ten per-stage point totals as JSON
//! - Pluggable key-value backends (memory, file, LocalStorage)
//! - Missing or corrupt data falls back to a zeroed record

mod store;

pub use store::{KeyValueStore, MemoryStore};
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;

use std::fmt;

use crate::progress::ProgressRecord;

/// Storage key for the progress record
pub const PROGRESS_KEY: &str = "flappyteddy_progression_v1";

/// Failure talking to a storage backend
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
    /// Backend not present (e.g. LocalStorage disabled)
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Serialize(e) => write!(f, "malformed save data: {e}"),
            StorageError::Unavailable(why) => write!(f, "storage unavailable: {why}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Serialize(e) => Some(e),
            StorageError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialize(e)
    }
}

/// Loads and saves the progress record through a key-value backend
///
/// Never fails outward: errors are logged and the game keeps running on an
/// in-memory copy.
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store that only lives as long as the process
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    /// Platform default: LocalStorage on wasm32, a JSON file in `dir` natively
    #[cfg(not(target_arch = "wasm32"))]
    pub fn platform_default(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Box::new(FileStore::new(dir)))
    }

    #[cfg(target_arch = "wasm32")]
    pub fn platform_default() -> Self {
        Self::new(Box::new(LocalStore))
    }

    /// Load the saved record, or a zeroed one if absent/corrupt/unreachable
    pub fn load(&self) -> ProgressRecord {
        match self.try_load() {
            Ok(Some(record)) => {
                log::info!("Loaded progress ({} stars)", record.total_stars());
                record
            }
            Ok(None) => {
                log::info!("No saved progress, starting fresh");
                ProgressRecord::new()
            }
            Err(e) => {
                log::warn!("Could not load progress, using defaults: {e}");
                ProgressRecord::new()
            }
        }
    }

    fn try_load(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let Some(json) = self.backend.get(PROGRESS_KEY)? else {
            return Ok(None);
        };
        let values: Vec<i64> = serde_json::from_str(&json)?;
        match ProgressRecord::from_stored(&values) {
            Some(record) => Ok(Some(record)),
            None => {
                log::warn!("Saved progress has {} entries, ignoring", values.len());
                Ok(None)
            }
        }
    }

    /// Persist synchronously; failures are logged, not raised
    pub fn save(&mut self, record: &ProgressRecord) {
        if let Err(e) = self.try_save(record) {
            log::warn!("Could not save progress: {e}");
        }
    }

    fn try_save(&mut self, record: &ProgressRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string(record)?;
        self.backend.set(PROGRESS_KEY, &json)?;
        log::debug!("Progress saved: {json}");
        Ok(())
    }
}
