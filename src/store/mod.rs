//! Persistence modules

pub mod scores;

pub use scores::HighScoreStore;
