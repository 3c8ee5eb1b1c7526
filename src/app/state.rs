//! Application state shared across routes

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use crate::config::Config;
use crate::store::{scores::StoreError, HighScoreStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scores: HighScoreStore,
    pub active_sessions: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, StoreError> {
        let scores = HighScoreStore::open(config.high_score_path.clone())?;

        Ok(Self {
            config: Arc::new(config),
            scores,
            active_sessions: Arc::new(AtomicUsize::new(0)),
        })
    }
}
