//! Simulated SSH session terminal for the QCC dashboard.
//!
//! No network I/O happens here. "Connecting" is a timer and the remote shell
//! is a fixed table of canned replies.

pub mod scheduler;
pub mod script;
mod terminal;

/// Cancellable one-shot timers keyed by session id.
pub use scheduler::{Scheduler, SessionId, TaskId};
/// Connection phase of a terminal.
pub use terminal::Phase;
/// Terminal state machine and scripted shell front.
pub use terminal::SessionTerminal;
