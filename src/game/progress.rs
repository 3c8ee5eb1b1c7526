//! Progress and lifecycle tracking
//!
//! Distance is derived from downhill pixel displacement, lives drain on
//! hits, and zero lives freezes the session until an explicit reset.

use tracing::{info, warn};

use crate::store::HighScoreStore;

use super::collision::CollisionEvent;

/// Downhill pixels per distance unit
pub const PIXELS_PER_DISTANCE_UNIT: f64 = 18.0;

/// Lives at the start of a run
pub const STARTING_LIVES: u32 = 5;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    GameOver,
}

/// Tracks distance, lives and the high score for one session
pub struct ProgressTracker {
    lives: u32,
    distance_units: f64,
    phase: SessionPhase,
    store: HighScoreStore,
    obstacle_hits_cost_life: bool,
}

impl ProgressTracker {
    pub fn new(store: HighScoreStore, obstacle_hits_cost_life: bool) -> Self {
        Self {
            lives: STARTING_LIVES,
            distance_units: 0.0,
            phase: SessionPhase::Running,
            store,
            obstacle_hits_cost_life,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Distance travelled this run, in distance units (one decimal place)
    pub fn distance(&self) -> f64 {
        self.distance_units
    }

    pub fn best_distance(&self) -> f64 {
        self.store.best()
    }

    /// Derive the distance from the skier's cumulative downhill displacement.
    /// Frozen once the session has ended.
    pub fn observe_distance(&mut self, travelled_px: f32) {
        if !self.is_running() {
            return;
        }
        self.distance_units = (travelled_px as f64 / PIXELS_PER_DISTANCE_UNIT * 10.0).round() / 10.0;
    }

    /// Apply a collision outcome; returns true when it ended the session
    pub fn apply_collision(&mut self, event: &CollisionEvent) -> bool {
        if !self.is_running() {
            return false;
        }
        match event {
            CollisionEvent::MonsterAteSkier { .. } => self.lose_life(),
            CollisionEvent::SnowboarderHitSkier { .. } => false,
            CollisionEvent::ObstacleHitSkier { .. } => {
                if self.obstacle_hits_cost_life {
                    self.lose_life()
                } else {
                    false
                }
            }
        }
    }

    fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        info!(lives = self.lives, "Skier lost a life");
        if self.lives == 0 {
            self.finish();
            return true;
        }
        false
    }

    fn finish(&mut self) {
        self.phase = SessionPhase::GameOver;

        let best = match self.store.record(self.distance_units) {
            Ok(best) => best,
            Err(e) => {
                warn!(error = %e, "Failed to persist high score");
                self.store.best()
            }
        };

        info!(
            distance = self.distance_units,
            best_distance = best,
            "Game over"
        );
    }

    /// Start a fresh run: full lives, zero distance, high score re-read
    pub fn reset(&mut self) {
        self.lives = STARTING_LIVES;
        self.distance_units = 0.0;
        self.store.reload();
        self.phase = SessionPhase::Running;
        info!("Session reset");
    }
}
