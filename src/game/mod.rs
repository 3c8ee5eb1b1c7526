//! Game simulation modules

pub mod assets;
pub mod collision;
pub mod entity;
pub mod movement;
pub mod progress;
pub mod session;
pub mod spawn;

pub use progress::SessionPhase;
pub use session::{GameSession, SessionConfig, World};

/// Viewport dimensions reported by the embedding host. The camera is
/// centered on the skier.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn left(&self, center_x: f32) -> f32 {
        center_x - self.width as f32 / 2.0
    }

    pub fn right(&self, center_x: f32) -> f32 {
        center_x + self.width as f32 / 2.0
    }

    pub fn top(&self, center_y: f32) -> f32 {
        center_y - self.height as f32 / 2.0
    }

    pub fn bottom(&self, center_y: f32) -> f32 {
        center_y + self.height as f32 / 2.0
    }
}
