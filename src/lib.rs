//! Ski Runner - embeddable endless-runner skiing game
//!
//! The game is headless: an embedding host connects over `/egi` and drives
//! it with the EGI control protocol (`SetupEGI`, `Ping`, `Step`), while the
//! game reports readiness, liveness, faults and game-over events back.
//! Rendering hangs off the per-cycle hooks and the asset loader seam.

pub mod app;
pub mod config;
pub mod egi;
pub mod game;
pub mod http;
pub mod store;
pub mod util;
