//! Styled output lines.
//!
//! Core logic never embeds presentation markup. Each line carries a style tag
//! and the front end decides what the tag looks like.

use std::fmt;

use crate::error::{ErrorKind, QccError};

/// Presentation hint for a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    #[default]
    Plain,
    /// Echoed prompt + command.
    Prompt,
    Heading,
    /// Highlighted content (banner art, model names).
    Accent,
    Muted,
    Success,
    Info,
    Warning,
    Error,
}

/// A single renderable line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub style: LineStyle,
}

impl OutputLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Plain)
    }

    pub fn prompt(prompt: &str, command: &str) -> Self {
        let text = if command.is_empty() {
            prompt.to_string()
        } else {
            format!("{prompt} {command}")
        };
        Self::new(text, LineStyle::Prompt)
    }

    /// Render an error as a line; usage errors are warnings, the rest errors.
    pub fn from_error(err: &QccError) -> Self {
        let style = match err.kind() {
            ErrorKind::Usage => LineStyle::Warning,
            _ => LineStyle::Error,
        };
        Self::new(err.to_string(), style)
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
