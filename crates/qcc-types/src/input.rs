//! Platform-agnostic key events.
//!
//! Front ends map their native input to these variants. The console and the
//! terminal emulator never see raw platform input.

/// A key event delivered to a console or terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Submit the input buffer.
    Enter,
    /// Step back through history.
    Up,
    /// Step forward through history.
    Down,
    /// Complete the command name in the input buffer.
    Tab,
    /// Delete the last character of the input buffer.
    Backspace,
    /// Character typed.
    Char(char),
}

impl Key {
    /// Map a character to a key, recognizing control characters.
    pub fn from_char(ch: char) -> Self {
        match ch {
            '\n' | '\r' => Self::Enter,
            '\t' => Self::Tab,
            '\u{8}' | '\u{7f}' => Self::Backspace,
            c => Self::Char(c),
        }
    }
}
