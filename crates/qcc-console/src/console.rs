//! Console session: output log, input buffer, history, and completion.

use std::collections::VecDeque;

use qcc_types::config::ConsoleConfig;
use qcc_types::input::Key;
use qcc_types::output::{LineStyle, OutputLine};

use crate::commands::welcome_banner;
use crate::interpreter::{CommandOutput, CommandRegistry, Environment};

/// Separator between names on a completion suggestion line.
const SUGGESTION_SEPARATOR: &str = "   ";

/// State of one command console.
///
/// History is stored most recent first. `history_index` is `None` while the
/// user is editing a fresh line.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    prompt: String,
    output: Vec<OutputLine>,
    input: String,
    history: VecDeque<String>,
    history_index: Option<usize>,
    history_limit: usize,
}

impl ConsoleSession {
    /// Create a session showing the welcome banner.
    pub fn new(config: &ConsoleConfig) -> Self {
        Self {
            prompt: config.prompt.clone(),
            output: welcome_banner(),
            input: String::new(),
            history: VecDeque::new(),
            history_index: None,
            history_limit: config.history_limit,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Past submissions, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history_index
    }

    /// Replace the input buffer.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Dispatch a key event.
    pub fn handle_key(&mut self, key: Key, reg: &CommandRegistry, env: &mut Environment<'_>) {
        match key {
            Key::Enter => self.submit(reg, env),
            Key::Up => self.history_prev(),
            Key::Down => self.history_next(),
            Key::Tab => self.complete(reg),
            Key::Backspace => self.backspace(),
            Key::Char(c) => self.insert_char(c),
        }
    }

    /// Submit the input buffer.
    ///
    /// Non-empty input is executed and pushed to the front of history.
    /// Blank input only echoes an empty prompt. The buffer is cleared either
    /// way.
    pub fn submit(&mut self, reg: &CommandRegistry, env: &mut Environment<'_>) {
        let command = self.input.trim().to_string();
        if command.is_empty() {
            self.output.push(OutputLine::prompt(&self.prompt, ""));
        } else {
            self.execute(&command, reg, env);
            self.push_history(command);
        }
        self.history_index = None;
        self.input.clear();
    }

    fn execute(&mut self, command: &str, reg: &CommandRegistry, env: &mut Environment<'_>) {
        let result = reg.execute(command, env);
        if let Ok(CommandOutput::Clear) = result {
            self.output.clear();
            return;
        }
        self.output.push(OutputLine::prompt(&self.prompt, command));
        match result {
            Ok(CommandOutput::Lines(lines)) => self.output.extend(lines),
            Ok(CommandOutput::Table {
                headers,
                rows,
                styles,
            }) => {
                self.output.extend(render_table(&headers, &rows, &styles));
            },
            Ok(CommandOutput::None | CommandOutput::Clear | CommandOutput::Help) => {},
            Err(e) => self.output.push(OutputLine::from_error(&e)),
        }
    }

    fn push_history(&mut self, command: String) {
        self.history.push_front(command);
        self.history.truncate(self.history_limit);
    }

    /// Step to the next older history entry. Stops at the oldest.
    pub fn history_prev(&mut self) {
        let next = self.history_index.map_or(0, |i| i + 1);
        if let Some(entry) = self.history.get(next) {
            self.input = entry.clone();
            self.history_index = Some(next);
        }
    }

    /// Step to the next newer history entry.
    ///
    /// Stepping past the newest entry returns to a fresh, empty line.
    pub fn history_next(&mut self) {
        match self.history_index {
            Some(i) if i > 0 => {
                self.history_index = Some(i - 1);
                self.input = self.history[i - 1].clone();
            },
            _ => {
                self.history_index = None;
                self.input.clear();
            },
        }
    }

    /// Complete the command name in the input buffer.
    ///
    /// A single match replaces the buffer. Several matches are listed in the
    /// log and the buffer is left alone.
    pub fn complete(&mut self, reg: &CommandRegistry) {
        let matches = reg.completions(&self.input);
        match matches.len() {
            0 => {},
            1 => self.input = matches[0].clone(),
            _ => {
                self.output.push(OutputLine::prompt(&self.prompt, &self.input));
                self.output.push(OutputLine::new(
                    matches.join(SUGGESTION_SEPARATOR),
                    LineStyle::Warning,
                ));
            },
        }
    }
}

/// Lay out a table as padded columns with a heading row.
///
/// `styles[i]` styles data row `i`; rows without one are plain.
pub fn render_table(
    headers: &[String],
    rows: &[Vec<String>],
    styles: &[LineStyle],
) -> Vec<OutputLine> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let format_row = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c:<width$}", width = widths[i]))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(OutputLine::new(format_row(headers), LineStyle::Heading));
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    lines.push(OutputLine::new("-".repeat(rule_len), LineStyle::Muted));
    for (i, row) in rows.iter().enumerate() {
        let style = styles.get(i).copied().unwrap_or_default();
        lines.push(OutputLine::new(format_row(row), style));
    }
    lines
}
