//! Simulated SSH session terminal.
//!
//! Phases move Disconnected -> Connecting -> Connected and back to
//! Disconnected only through `exit`. Both delayed transitions are timers on
//! the terminal's own scheduler, keyed by the current connection's session
//! id. Opening a new connection cancels everything left over from the
//! previous one.

use std::fmt;
use std::time::Duration;

use qcc_types::config::TerminalConfig;
use qcc_types::error::{QccError, Result};
use qcc_types::input::Key;

use crate::scheduler::{Scheduler, SessionId, TaskId};
use crate::script::{Response, respond};

const AUTH_LINE: &str = "Authenticating with public key \"rsa-key-20240101\"...";
const OS_BANNER: &str = "Welcome to Ubuntu 22.04.3 LTS (GNU/Linux 5.15.0-78-generic x86_64)";
const LAST_LOGIN_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Connection phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Disconnected,
    Connecting,
    Connected,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TimerAction {
    /// Finish the handshake; `last_login` was captured at connect time.
    Connected { last_login: String },
    /// Drop the connection and reset the terminal.
    Logout,
}

/// State of one session terminal.
#[derive(Debug)]
pub struct SessionTerminal {
    host: String,
    user: String,
    password: String,
    phase: Phase,
    output: Vec<String>,
    input: String,
    scheduler: Scheduler<TimerAction>,
    session: SessionId,
    pending_logout: Option<TaskId>,
    mounted: bool,
    connect_delay: Duration,
    logout_delay: Duration,
}

impl SessionTerminal {
    /// Create a disconnected terminal with the configured form defaults.
    pub fn new(config: &TerminalConfig) -> Self {
        Self {
            host: config.host.clone(),
            user: config.user.clone(),
            password: String::new(),
            phase: Phase::Disconnected,
            output: Vec::new(),
            input: String::new(),
            scheduler: Scheduler::new(),
            session: SessionId(0),
            pending_logout: None,
            mounted: false,
            connect_delay: config.connect_delay(),
            logout_delay: config.logout_delay(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Id of the current (or most recent) connection.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Timers of the current connection still waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_for(self.session)
    }

    /// Prompt shown before each echoed line.
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$", self.user, self.host)
    }

    pub fn set_host(&mut self, host: &str) -> Result<()> {
        self.ensure_editable()?;
        self.host = host.to_string();
        Ok(())
    }

    pub fn set_user(&mut self, user: &str) -> Result<()> {
        self.ensure_editable()?;
        self.user = user.to_string();
        Ok(())
    }

    pub fn set_password(&mut self, password: &str) -> Result<()> {
        self.ensure_editable()?;
        self.password = password.to_string();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.phase == Phase::Disconnected {
            Ok(())
        } else {
            Err(QccError::Session(format!(
                "connection details are locked while {}",
                self.phase
            )))
        }
    }

    /// Connect once with the pre-populated details. Later calls do nothing.
    pub fn mount(&mut self) -> Result<()> {
        if self.mounted {
            return Ok(());
        }
        self.mounted = true;
        self.connect()
    }

    /// Start connecting to the current host as the current user.
    pub fn connect(&mut self) -> Result<()> {
        if self.host.trim().is_empty() || self.user.trim().is_empty() {
            return Err(QccError::Validation(
                "Please provide IP Address and Username.".to_string(),
            ));
        }
        if self.phase != Phase::Disconnected {
            return Err(QccError::Session(format!(
                "cannot connect while {}",
                self.phase
            )));
        }

        let stale = self.scheduler.cancel_session(self.session);
        if stale > 0 {
            log::debug!("Cancelled {stale} stale timer(s) of {}", self.session);
        }
        self.session = SessionId(self.session.0 + 1);
        self.pending_logout = None;
        self.phase = Phase::Connecting;
        self.output = vec![format!("Attempting to connect to {}...", self.host)];

        let last_login = chrono::Local::now().format(LAST_LOGIN_FORMAT).to_string();
        self.scheduler.schedule(
            self.session,
            self.connect_delay,
            TimerAction::Connected { last_login },
        );
        log::info!(
            "Connecting to {} as {} ({})",
            self.host,
            self.user,
            self.session
        );
        Ok(())
    }

    /// Run a line in the remote shell.
    pub fn submit(&mut self, line: &str) -> Result<()> {
        if self.phase != Phase::Connected {
            return Err(QccError::Session(format!(
                "cannot run commands while {}",
                self.phase
            )));
        }
        let command = line.trim();
        if command.is_empty() {
            return Ok(());
        }

        self.output.push(format!("{} {command}", self.prompt()));
        match respond(command, &self.user) {
            Response::Lines(lines) => self.output.extend(lines),
            Response::Clear => self.output.clear(),
            Response::Logout => {
                self.output.push("logout".to_string());
                // A second `exit` replaces the pending logout.
                if let Some(id) = self.pending_logout.take() {
                    self.scheduler.cancel(id);
                }
                self.pending_logout = Some(self.scheduler.schedule(
                    self.session,
                    self.logout_delay,
                    TimerAction::Logout,
                ));
                log::info!("Logout scheduled for {}", self.session);
            },
        }
        self.input.clear();
        Ok(())
    }

    /// Dispatch a key event. History and completion keys are ignored.
    ///
    /// The input line only exists while connected: typing is dropped in the
    /// other phases, and Enter always leaves an empty buffer behind.
    pub fn handle_key(&mut self, key: Key) -> Result<()> {
        let connected = self.phase == Phase::Connected;
        match key {
            Key::Enter => {
                let line = std::mem::take(&mut self.input);
                self.submit(&line)?;
            },
            Key::Char(c) if connected => self.input.push(c),
            Key::Backspace if connected => {
                self.input.pop();
            },
            Key::Char(_) | Key::Backspace | Key::Up | Key::Down | Key::Tab => {},
        }
        Ok(())
    }

    /// Advance the terminal clock and apply timers that came due.
    pub fn tick(&mut self, elapsed: Duration) {
        for (session, action) in self.scheduler.advance(elapsed) {
            if session != self.session {
                log::warn!("Dropping timer from stale {session}");
                continue;
            }
            self.apply(action);
        }
    }

    fn apply(&mut self, action: TimerAction) {
        match action {
            TimerAction::Connected { last_login } => {
                if self.phase != Phase::Connecting {
                    return;
                }
                self.phase = Phase::Connected;
                self.output = vec![
                    AUTH_LINE.to_string(),
                    OS_BANNER.to_string(),
                    format!("Last login: {last_login}"),
                ];
                log::info!("Connected to {} ({})", self.host, self.session);
            },
            TimerAction::Logout => {
                self.pending_logout = None;
                self.phase = Phase::Disconnected;
                self.output.clear();
                self.input.clear();
                self.password.clear();
                log::info!("Disconnected from {} ({})", self.host, self.session);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TerminalConfig {
        TerminalConfig::default()
    }

    fn connected() -> SessionTerminal {
        let mut t = SessionTerminal::new(&config());
        t.connect().unwrap();
        t.tick(config().connect_delay());
        assert_eq!(t.phase(), Phase::Connected);
        t
    }

    #[test]
    fn starts_disconnected_with_defaults() {
        let t = SessionTerminal::new(&config());
        assert_eq!(t.phase(), Phase::Disconnected);
        assert_eq!(t.host(), "192.168.1.101");
        assert_eq!(t.user(), "quantum_admin");
        assert!(t.output().is_empty());
        assert_eq!(t.prompt(), "quantum_admin@192.168.1.101:~$");
    }

    #[test]
    fn connect_requires_host_and_user() {
        let mut t = SessionTerminal::new(&config());
        t.set_host("").unwrap();
        let err = t.connect().unwrap_err();
        assert_eq!(err.to_string(), "Please provide IP Address and Username.");
        assert_eq!(t.phase(), Phase::Disconnected);
        assert!(t.output().is_empty());
        assert_eq!(t.pending_timers(), 0);

        t.set_host("10.0.0.2").unwrap();
        t.set_user("  ").unwrap();
        assert!(t.connect().is_err());
        assert_eq!(t.phase(), Phase::Disconnected);
    }

    #[test]
    fn connect_goes_through_connecting() {
        let mut t = SessionTerminal::new(&config());
        t.connect().unwrap();
        assert_eq!(t.phase(), Phase::Connecting);
        assert_eq!(t.output(), ["Attempting to connect to 192.168.1.101..."]);

        t.tick(Duration::from_millis(1499));
        assert_eq!(t.phase(), Phase::Connecting);

        t.tick(Duration::from_millis(1));
        assert_eq!(t.phase(), Phase::Connected);
        assert_eq!(t.output().len(), 3);
        assert_eq!(t.output()[0], AUTH_LINE);
        assert_eq!(t.output()[1], OS_BANNER);
        assert!(t.output()[2].starts_with("Last login: "));
    }

    #[test]
    fn connect_twice_is_rejected() {
        let mut t = SessionTerminal::new(&config());
        t.connect().unwrap();
        assert!(matches!(t.connect(), Err(QccError::Session(_))));
        assert_eq!(t.pending_timers(), 1);
    }

    #[test]
    fn mount_connects_once() {
        let mut t = SessionTerminal::new(&config());
        t.mount().unwrap();
        assert_eq!(t.phase(), Phase::Connecting);
        let session = t.session();
        t.mount().unwrap();
        assert_eq!(t.session(), session);
        assert_eq!(t.pending_timers(), 1);
    }

    #[test]
    fn submit_requires_connection() {
        let mut t = SessionTerminal::new(&config());
        assert!(matches!(t.submit("ls"), Err(QccError::Session(_))));
        t.connect().unwrap();
        assert!(t.submit("ls").is_err());
    }

    #[test]
    fn submit_echoes_prompt_and_output() {
        let mut t = connected();
        t.submit("  whoami ").unwrap();
        let out = t.output();
        assert_eq!(out[out.len() - 2], "quantum_admin@192.168.1.101:~$ whoami");
        assert_eq!(out[out.len() - 1], "quantum_admin");
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut t = connected();
        let before = t.output().len();
        t.submit("   ").unwrap();
        assert_eq!(t.output().len(), before);
    }

    #[test]
    fn unknown_command_not_found() {
        let mut t = connected();
        t.submit("rm -rf /").unwrap();
        assert_eq!(
            t.output().last().unwrap(),
            "-bash: rm -rf /: command not found"
        );
    }

    #[test]
    fn clear_is_immediate() {
        let mut t = connected();
        t.submit("ls").unwrap();
        t.submit("CLEAR").unwrap();
        assert!(t.output().is_empty());
        assert_eq!(t.pending_timers(), 0);
    }

    #[test]
    fn exit_logs_out_after_delay() {
        let mut t = connected();
        t.submit("exit").unwrap();
        assert_eq!(t.output().last().unwrap(), "logout");
        assert_eq!(t.phase(), Phase::Connected);

        t.tick(Duration::from_millis(499));
        assert_eq!(t.phase(), Phase::Connected);

        t.tick(Duration::from_millis(1));
        assert_eq!(t.phase(), Phase::Disconnected);
        assert!(t.output().is_empty());
        assert!(t.input().is_empty());
    }

    #[test]
    fn logout_clears_password() {
        let mut t = SessionTerminal::new(&config());
        t.set_password("hunter2").unwrap();
        t.connect().unwrap();
        t.tick(config().connect_delay());
        t.submit("exit").unwrap();
        t.tick(config().logout_delay());
        assert_eq!(t.password(), "");
    }

    #[test]
    fn second_exit_replaces_pending_logout() {
        let mut t = connected();
        t.submit("exit").unwrap();
        t.tick(Duration::from_millis(300));
        t.submit("exit").unwrap();
        assert_eq!(t.pending_timers(), 1);

        t.tick(Duration::from_millis(300));
        assert_eq!(t.phase(), Phase::Connected);
        t.tick(Duration::from_millis(200));
        assert_eq!(t.phase(), Phase::Disconnected);
    }

    #[test]
    fn reconnect_after_logout_opens_new_session() {
        let mut t = connected();
        let first = t.session();
        t.submit("exit").unwrap();
        t.tick(config().logout_delay());
        t.connect().unwrap();
        assert_ne!(t.session(), first);
        assert_eq!(t.phase(), Phase::Connecting);
        t.tick(config().connect_delay());
        assert_eq!(t.phase(), Phase::Connected);
    }

    #[test]
    fn details_locked_unless_disconnected() {
        let mut t = connected();
        assert!(t.set_host("10.1.1.1").is_err());
        assert!(t.set_user("root").is_err());
        assert_eq!(t.host(), "192.168.1.101");
    }

    #[test]
    fn handle_key_builds_and_submits_line() {
        let mut t = connected();
        for ch in "pwdd".chars() {
            t.handle_key(Key::Char(ch)).unwrap();
        }
        t.handle_key(Key::Backspace).unwrap();
        t.handle_key(Key::Up).unwrap();
        assert_eq!(t.input(), "pwd");
        t.handle_key(Key::Enter).unwrap();
        assert_eq!(t.output().last().unwrap(), "/home/quantum_admin");
        assert!(t.input().is_empty());
    }

    #[test]
    fn typing_dropped_until_connected() {
        let mut t = SessionTerminal::new(&config());
        t.connect().unwrap();
        for ch in "ls".chars() {
            t.handle_key(Key::Char(ch)).unwrap();
        }
        assert!(t.input().is_empty());
        assert!(t.handle_key(Key::Enter).is_err());

        t.tick(config().connect_delay());
        for ch in "pwd".chars() {
            t.handle_key(Key::Char(ch)).unwrap();
        }
        t.handle_key(Key::Enter).unwrap();
        assert_eq!(t.output().last().unwrap(), "/home/quantum_admin");
    }

    #[test]
    fn rejected_enter_leaves_empty_buffer() {
        let mut t = connected();
        t.handle_key(Key::Char('l')).unwrap();
        t.submit("exit").unwrap();
        t.tick(config().logout_delay());
        assert!(t.input().is_empty());
        assert!(t.handle_key(Key::Enter).is_err());
        assert!(t.input().is_empty());
    }

    #[test]
    fn logout_timer_fires_once() {
        let mut t = connected();
        t.submit("exit").unwrap();
        t.submit("exit").unwrap();
        t.submit("exit").unwrap();
        assert_eq!(t.pending_timers(), 1);
        t.tick(config().logout_delay());
        assert_eq!(t.pending_timers(), 0);
        assert_eq!(t.phase(), Phase::Disconnected);
    }

    #[test]
    fn custom_delays_from_config() {
        let cfg = TerminalConfig {
            connect_delay_ms: 10,
            logout_delay_ms: 5,
            ..TerminalConfig::default()
        };
        let mut t = SessionTerminal::new(&cfg);
        t.connect().unwrap();
        t.tick(Duration::from_millis(10));
        assert_eq!(t.phase(), Phase::Connected);
        t.submit("exit").unwrap();
        t.tick(Duration::from_millis(5));
        assert_eq!(t.phase(), Phase::Disconnected);
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Connecting.to_string(), "connecting");
    }
}
