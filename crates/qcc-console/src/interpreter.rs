//! Command trait, registry, and dispatch logic.
//!
//! The registry keeps commands in registration order, which is also the
//! order `help` lists them in. Names are lowercased on the way in and
//! lookup is case-insensitive.

use std::collections::HashMap;

use qcc_types::error::{QccError, Result};
use qcc_types::job::{AiModel, Job};
use qcc_types::output::{LineStyle, OutputLine};
use rand::RngCore;

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Styled text lines.
    Lines(Vec<OutputLine>),
    /// Tabular data (header row + data rows).
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        /// Style of each data row. Rows past the end are plain.
        styles: Vec<LineStyle>,
    },
    /// Command produced no visible output.
    None,
    /// Signal to clear the console output log.
    Clear,
    /// Signal to the registry to render its command listing.
    Help,
}

/// Shared dashboard state lent to every command.
///
/// The job list is the only thing a command may change.
pub struct Environment<'a> {
    /// Shared job list, most recently deployed first.
    pub jobs: &'a mut Vec<Job>,
    /// Read-only model catalog.
    pub models: &'a [AiModel],
    /// Whether the dashboard holds an API token.
    pub authenticated: bool,
    /// Backend assigned to new jobs.
    pub default_backend: &'a str,
    /// Prefix for generated job ids.
    pub job_id_prefix: &'a str,
    /// Randomness for job ids.
    pub rng: &'a mut dyn RngCore,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Argument synopsis (e.g. `<job_id>`), if the command takes any.
    fn usage(&self) -> Option<&str> {
        None
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

struct Entry {
    key: String,
    command: Box<dyn Command>,
}

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a command.
    ///
    /// Re-registering a name replaces the command but keeps its original
    /// position in the listing.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let key = cmd.name().to_ascii_lowercase();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].command = cmd,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(Entry { key, command: cmd });
            },
        }
    }

    /// Look up a command by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| self.entries[i].command.as_ref())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse and execute a command line.
    ///
    /// The first whitespace-separated token names the command, the rest are
    /// positional arguments. Blank input yields `CommandOutput::None`.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(CommandOutput::None);
        };
        let args: Vec<&str> = tokens.collect();

        let Some(cmd) = self.get(name) else {
            log::debug!("Unrecognized command: {name}");
            return Err(QccError::UnknownCommand(name.to_string()));
        };

        log::debug!("Dispatching '{}' with {} arg(s)", cmd.name(), args.len());
        match cmd.execute(&args, env)? {
            CommandOutput::Help => Ok(CommandOutput::Lines(self.help_lines())),
            other => Ok(other),
        }
    }

    /// Render the command listing shown by `help`.
    pub fn help_lines(&self) -> Vec<OutputLine> {
        let mut lines = Vec::with_capacity(self.entries.len() + 1);
        lines.push(OutputLine::new("Available Commands:", LineStyle::Heading));
        for e in &self.entries {
            let usage = e.command.usage().unwrap_or("");
            lines.push(OutputLine::plain(format!(
                "{:<10}{:<14}- {}",
                e.key,
                usage,
                e.command.description()
            )));
        }
        lines
    }

    /// Return completions for a partial command name, in registration order.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let lower = partial.to_ascii_lowercase();
        self.entries
            .iter()
            .filter(|e| e.key.starts_with(&lower))
            .map(|e| e.key.clone())
            .collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
