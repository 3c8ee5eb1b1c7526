//! EGI host-embedding surface

pub mod channel;
pub mod handler;
pub mod protocol;

pub use channel::CommandChannel;
pub use protocol::{GameCommand, HostSignal, StepDirection};
