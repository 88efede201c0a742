use qcc_session::{Phase, SessionId};
use qcc_types::output::{LineStyle, OutputLine};

use crate::app_state::AppState;

const CONSOLE_TAG: &str = "console |";
const TERMINAL_TAG: &str = "ssh     |";
const NOTICE_TAG: &str = "        *";

/// ANSI SGR code for a line style. `None` means default attributes.
fn sgr(style: LineStyle) -> Option<&'static str> {
    match style {
        LineStyle::Plain => None,
        LineStyle::Prompt => Some("1;32"),
        LineStyle::Heading => Some("1;36"),
        LineStyle::Accent => Some("35"),
        LineStyle::Muted => Some("2"),
        LineStyle::Success => Some("32"),
        LineStyle::Info => Some("34"),
        LineStyle::Warning => Some("33"),
        LineStyle::Error => Some("31"),
    }
}

/// Incremental printer for the two log widgets.
///
/// Only lines appended since the last frame are emitted. A log that shrank
/// was cleared and is announced with a marker. The terminal log is printed
/// in full whenever the connection phase or session changes.
#[derive(Debug)]
pub struct Renderer {
    color: bool,
    console_seen: usize,
    terminal_seen: usize,
    phase: Phase,
    session: SessionId,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            console_seen: 0,
            terminal_seen: 0,
            phase: Phase::Disconnected,
            session: SessionId(0),
        }
    }

    /// Color unless `NO_COLOR` is set.
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("NO_COLOR").is_none())
    }

    fn paint(&self, tag: &str, line: &OutputLine) -> String {
        match sgr(line.style).filter(|_| self.color) {
            Some(code) => format!("{tag} \x1b[{code}m{}\x1b[0m", line.text),
            None => format!("{tag} {}", line.text),
        }
    }

    /// Lines to print for everything that changed since the previous frame.
    pub fn frame(&mut self, state: &AppState) -> Vec<String> {
        let mut out = Vec::new();

        let console = state.console.output();
        if console.len() < self.console_seen {
            out.push(self.paint(
                CONSOLE_TAG,
                &OutputLine::new("-- cleared --", LineStyle::Muted),
            ));
            self.console_seen = 0;
        }
        for line in &console[self.console_seen..] {
            out.push(self.paint(CONSOLE_TAG, line));
        }
        self.console_seen = console.len();

        let terminal = state.terminal.output();
        let phase = state.terminal.phase();
        let session = state.terminal.session();
        if phase != self.phase || session != self.session || terminal.len() < self.terminal_seen {
            let status = OutputLine::new(
                format!("[{phase}] {}", state.terminal.prompt()),
                LineStyle::Info,
            );
            out.push(self.paint(TERMINAL_TAG, &status));
            self.phase = phase;
            self.session = session;
            self.terminal_seen = 0;
        }
        for text in &terminal[self.terminal_seen..] {
            out.push(self.paint(TERMINAL_TAG, &OutputLine::plain(text.as_str())));
        }
        self.terminal_seen = terminal.len();

        out
    }

    pub fn notices(&self, notices: &[OutputLine]) -> Vec<String> {
        notices.iter().map(|n| self.paint(NOTICE_TAG, n)).collect()
    }
}
