//! Best-distance persistence
//!
//! A single value, stored as a number-like string in one file. Read once at
//! startup, written back at game over.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read high score file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write high score file: {0}")]
    Write(#[source] std::io::Error),

    #[error("high score file does not contain a number: {0:?}")]
    Malformed(String),
}

/// File-backed store for the best distance travelled
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    cached: Arc<Mutex<f64>>,
}

impl HighScoreStore {
    /// Open the store, reading the persisted value if present.
    /// A missing file means no score has been recorded yet.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let cached = match fs::read_to_string(&path) {
            Ok(raw) => {
                let trimmed = raw.trim();
                let value: f64 = trimmed
                    .parse()
                    .map_err(|_| StoreError::Malformed(trimmed.to_string()))?;
                info!(path = %path.display(), best_distance = value, "Loaded high score");
                value
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0.0,
            Err(e) => return Err(StoreError::Read(e)),
        };

        Ok(Self {
            path,
            cached: Arc::new(Mutex::new(cached)),
        })
    }

    /// Current best distance
    pub fn best(&self) -> f64 {
        *self.cached.lock()
    }

    /// Record a finished run. Only a strictly better distance overwrites the
    /// stored value; the previous best survives a worse run.
    pub fn record(&self, distance: f64) -> Result<f64, StoreError> {
        let mut cached = self.cached.lock();
        if distance > *cached {
            *cached = distance;
            fs::write(&self.path, format!("{distance}")).map_err(StoreError::Write)?;
            info!(best_distance = distance, "New high score persisted");
        }
        Ok(*cached)
    }

    /// Re-read the persisted value, falling back to the cache on failure
    pub fn reload(&self) -> f64 {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(value) => {
                    *self.cached.lock() = value;
                    value
                }
                Err(_) => {
                    warn!(path = %self.path.display(), "Ignoring malformed high score file");
                    self.best()
                }
            },
            Err(_) => self.best(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static UNIQUE: AtomicU64 = AtomicU64::new(0);

    fn temp_path(tag: &str) -> PathBuf {
        let n = UNIQUE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "ski_runner_scores_{tag}_{}_{n}.txt",
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_means_zero() {
        let store = HighScoreStore::open(temp_path("missing")).unwrap();
        assert_eq!(store.best(), 0.0);
    }

    #[test]
    fn record_keeps_the_greater_value() {
        let path = temp_path("record");
        let store = HighScoreStore::open(path.clone()).unwrap();

        assert_eq!(store.record(120.5).unwrap(), 120.5);
        // A worse run must not clobber the stored best
        assert_eq!(store.record(40.0).unwrap(), 120.5);

        let reopened = HighScoreStore::open(path.clone()).unwrap();
        assert_eq!(reopened.best(), 120.5);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("malformed");
        fs::write(&path, "not-a-number").unwrap();
        let err = HighScoreStore::open(path.clone()).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));
        let _ = fs::remove_file(path);
    }
}
