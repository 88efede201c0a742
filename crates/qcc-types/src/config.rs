//! Runtime configuration.
//!
//! Loaded from an optional TOML file. Every key has a default, so an empty
//! file (or no file at all) yields the stock dashboard.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::backend::QuantumBackend;
use crate::error::{QccError, Result};
use crate::job::{AiModel, DEFAULT_BACKEND, DEFAULT_JOB_PREFIX};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QccConfig {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// Replacement model catalog. Empty means use the built-in catalog.
    #[serde(default)]
    pub models: Vec<AiModel>,
    /// Replacement backend list. Empty means use the built-in list.
    #[serde(default)]
    pub backends: Vec<QuantumBackend>,
}

impl QccConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the console cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.console.history_limit == 0 {
            return Err(QccError::Config(
                "console.history_limit must be at least 1".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for m in &self.models {
            if !seen.insert(m.name.as_str()) {
                return Err(QccError::Config(format!("duplicate model '{}'", m.name)));
            }
        }
        let mut seen = HashSet::new();
        for b in &self.backends {
            if !seen.insert(b.name.as_str()) {
                return Err(QccError::Config(format!("duplicate backend '{}'", b.name)));
            }
        }
        Ok(())
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(cfg)
    }
}

/// Command console settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Prompt echoed before every submitted command.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Maximum number of history entries kept.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Backend assigned to deployed jobs.
    #[serde(default = "default_backend")]
    pub default_backend: String,
    /// Prefix for generated job ids.
    #[serde(default = "default_job_prefix")]
    pub job_id_prefix: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            history_limit: default_history_limit(),
            default_backend: default_backend(),
            job_id_prefix: default_job_prefix(),
        }
    }
}

/// Session terminal settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalConfig {
    /// Host pre-populated in the connection form.
    #[serde(default = "default_host")]
    pub host: String,
    /// User pre-populated in the connection form.
    #[serde(default = "default_user")]
    pub user: String,
    /// Delay between `connect` and the connected banner.
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
    /// Delay between `exit` and the reset to disconnected.
    #[serde(default = "default_logout_delay_ms")]
    pub logout_delay_ms: u64,
}

impl TerminalConfig {
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }

    pub fn logout_delay(&self) -> Duration {
        Duration::from_millis(self.logout_delay_ms)
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            user: default_user(),
            connect_delay_ms: default_connect_delay_ms(),
            logout_delay_ms: default_logout_delay_ms(),
        }
    }
}

fn default_prompt() -> String {
    "user@qcc:~$".to_string()
}
fn default_history_limit() -> usize {
    100
}
fn default_backend() -> String {
    DEFAULT_BACKEND.to_string()
}
fn default_job_prefix() -> String {
    DEFAULT_JOB_PREFIX.to_string()
}
fn default_host() -> String {
    "192.168.1.101".to_string()
}
fn default_user() -> String {
    "quantum_admin".to_string()
}
fn default_connect_delay_ms() -> u64 {
    1500
}
fn default_logout_delay_ms() -> u64 {
    500
}
