//! Command console for the QCC dashboard.
//!
//! The console is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. A `ConsoleSession` owns the
//! output log, input buffer and history, and feeds submitted lines to the
//! registry together with the dashboard's shared state.

mod commands;
mod console;
mod interpreter;

/// Register the built-in commands (help, clear, welcome, deploy, jobs, status).
pub use commands::register_builtins;
/// Style used to show a job status.
pub use commands::status_style;
/// The startup banner.
pub use commands::welcome_banner;
/// Console session state and key handling.
pub use console::ConsoleSession;
/// Lay out tabular output as padded lines.
pub use console::render_table;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command.
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared dashboard state passed to every command.
pub use interpreter::Environment;
