//! Outbound command channel to the embedding host
//!
//! Commands issued before the host link is bound are queued, not dropped, and
//! flushed in order exactly once when binding completes. After that, delivery
//! is immediate and fire-and-forget.

use std::collections::VecDeque;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::protocol::GameCommand;

/// Channel carrying commands toward the host
pub struct CommandChannel {
    outbound: mpsc::UnboundedSender<GameCommand>,
    pending: VecDeque<GameCommand>,
    bound: bool,
}

impl CommandChannel {
    pub fn new(outbound: mpsc::UnboundedSender<GameCommand>) -> Self {
        Self {
            outbound,
            pending: VecDeque::new(),
            bound: false,
        }
    }

    /// Whether the host link has been bound
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Mark the host link as bound and flush everything queued so far.
    /// Idempotent: a second bind flushes nothing and changes nothing.
    pub fn bind(&mut self) {
        if self.bound {
            return;
        }
        self.bound = true;

        let queued = self.pending.len();
        while let Some(cmd) = self.pending.pop_front() {
            self.deliver(cmd);
        }
        if queued > 0 {
            debug!(flushed = queued, "Flushed pending commands on host bind");
        }
    }

    /// Send a command to the host, queueing it if the link is not bound yet
    pub fn send(&mut self, cmd: GameCommand) {
        if self.bound {
            self.deliver(cmd);
        } else {
            trace!(?cmd, "Host link not bound, queueing command");
            self.pending.push_back(cmd);
        }
    }

    fn deliver(&self, cmd: GameCommand) {
        // The receiver only disappears when the host connection is gone;
        // there is nobody left to tell at that point.
        let _ = self.outbound.send(cmd);
    }
}
