//! Map stdin lines to application events.
//!
//! Plain lines are typed into the focused widget and submitted. Lines
//! starting with `:` drive the parts of the dashboard a keyboard-only front
//! end has no keys for.

use qcc_types::input::Key;

use crate::app_state::Mode;

/// A single front-end event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Text appended to the focused input buffer, then Enter.
    Line(String),
    /// A single key for the focused widget.
    Key(Key),
    /// Type `partial` into a fresh console buffer and press Tab.
    Complete(String),
    Focus(Mode),
    Authenticate(String),
    ListModels,
    ListBackends,
    /// The repository's Deploy button.
    Deploy(String),
    Export,
    SetHost(String),
    SetUser(String),
    SetPassword(String),
    Connect,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one line read from stdin.
pub fn parse_line(line: &str) -> AppEvent {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(meta) = line.strip_prefix(':') else {
        return AppEvent::Line(line.to_string());
    };

    let (cmd, rest) = match meta.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (meta, ""),
    };
    match cmd {
        "up" => AppEvent::Key(Key::Up),
        "down" => AppEvent::Key(Key::Down),
        "tab" => AppEvent::Complete(rest.to_string()),
        "console" => AppEvent::Focus(Mode::Console),
        "ssh" => AppEvent::Focus(Mode::Terminal),
        "auth" => AppEvent::Authenticate(rest.to_string()),
        "models" => AppEvent::ListModels,
        "backends" => AppEvent::ListBackends,
        "deploy" => AppEvent::Deploy(rest.to_string()),
        "export" => AppEvent::Export,
        "host" => AppEvent::SetHost(rest.to_string()),
        "user" => AppEvent::SetUser(rest.to_string()),
        "password" => AppEvent::SetPassword(rest.to_string()),
        "connect" => AppEvent::Connect,
        "help" | "?" => AppEvent::Help,
        "quit" | "q" => AppEvent::Quit,
        other => AppEvent::Unknown(other.to_string()),
    }
}

/// Front-end key reference printed by `:help`.
pub const META_HELP: [&str; 15] = [
    ":console | :ssh      focus the command console / SSH terminal",
    ":up | :down          step through console history",
    ":tab <partial>       complete a console command name",
    ":auth <token>        connect with an API token",
    ":models              list the model repository",
    ":backends            show quantum backend status and queues",
    ":deploy <model>      deploy from the model repository",
    ":export              print the job list as JSON",
    ":host <address>      set the SSH host (while disconnected)",
    ":user <name>         set the SSH user (while disconnected)",
    ":password <secret>   set the SSH password (while disconnected)",
    ":connect             open the SSH connection",
    ":help                show this reference",
    ":quit                exit",
    "Any other line is typed into the focused widget and submitted.",
];
