//! EGI protocol message definitions
//! These are the wire types exchanged with the embedding host

use serde::{Deserialize, Serialize};

/// Discrete directional input forwarded by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Signals sent from the host to the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostSignal {
    /// Bind the host link, load assets and start the game loop
    #[serde(rename = "SetupEGI")]
    SetupEgi,

    /// Liveness probe, always answered with `Pong`
    Ping,

    /// Directional input for the skier
    Step { direction: StepDirection },

    /// Forward-compatibility catch-all: unrecognized signal types decode
    /// here and are ignored, never treated as an error
    #[serde(other)]
    Unknown,
}

/// Commands sent from the game to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameCommand {
    /// Emitted once, after the first successful setup
    Ready,

    /// Answer to a `Ping`
    Pong,

    /// Reserved for a future pause flow; never emitted by current game logic
    Suspend,

    /// Reserved for a future abort flow; never emitted by current game logic
    Abort,

    /// Terminal game state reached
    Finish { metrics: FinishMetrics },

    /// Runtime fault surfaced to the host
    Error {
        event: String,
        source: String,
        lineno: u32,
        colno: u32,
        error: Option<String>,
    },
}

/// Metrics attached to `Finish`. Currently always empty; the field exists so
/// the wire shape is stable when metrics are added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinishMetrics {}

impl GameCommand {
    /// Build an `Error` command from a fault description
    pub fn fault(event: impl Into<String>, source: impl Into<String>, detail: Option<String>) -> Self {
        Self::Error {
            event: event.into(),
            source: source.into(),
            lineno: 0,
            colno: 0,
            error: detail,
        }
    }
}
