//! Time utilities for the game cycle

use std::time::Instant;

/// Cycle rate configuration
pub const CYCLE_TPS: u32 = 30; // 30 cycles per second
pub const CYCLE_DURATION_MICROS: u64 = 1_000_000 / CYCLE_TPS as u64;

/// Delta time for one cycle (in seconds)
pub fn cycle_delta() -> f32 {
    1.0 / CYCLE_TPS as f32
}

/// Process start time for uptime tracking
static PROCESS_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize process start time (call once at startup)
pub fn init_process_time() {
    PROCESS_START.get_or_init(Instant::now);
}

/// Get process uptime in seconds
pub fn uptime_secs() -> u64 {
    PROCESS_START
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0)
}
