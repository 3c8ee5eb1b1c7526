//! Rate limiting utilities

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter type alias
pub type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Create a rate limiter with the specified requests per second
pub fn create_limiter(requests_per_second: u32) -> Arc<Limiter> {
    let quota = Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Inbound signal rate limit per host connection. Generous compared to the
/// cycle rate; Step bursts from key repeat stay well under it.
pub const SIGNAL_RATE_LIMIT: u32 = 120;

/// Per-connection rate limiter state
#[derive(Clone)]
pub struct HostRateLimiter {
    signal_limiter: Arc<Limiter>,
}

impl HostRateLimiter {
    pub fn new() -> Self {
        Self {
            signal_limiter: create_limiter(SIGNAL_RATE_LIMIT),
        }
    }

    /// Check if an inbound signal is allowed (returns true if allowed)
    pub fn check_signal(&self) -> bool {
        self.signal_limiter.check().is_ok()
    }
}

impl Default for HostRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
