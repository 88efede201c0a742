use qcc_console::{CommandRegistry, ConsoleSession, Environment, register_builtins, render_table};
use qcc_session::SessionTerminal;
use qcc_types::backend::{BackendStatus, QuantumBackend};
use qcc_types::config::QccConfig;
use qcc_types::error::{QccError, Result};
use qcc_types::input::Key;
use qcc_types::job::{AiModel, Job, submit_deployment};
use qcc_types::output::{LineStyle, OutputLine};
use rand::rngs::StdRng;

use crate::input::{AppEvent, META_HELP};
use crate::seed;

/// Width of the longest bar in the queue chart.
const QUEUE_BAR_WIDTH: u32 = 30;

/// Which widget receives typed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Console,
    Terminal,
}

/// Style of a backend on the status panel.
pub fn backend_style(status: BackendStatus) -> LineStyle {
    match status {
        BackendStatus::Online => LineStyle::Success,
        BackendStatus::Calibrating => LineStyle::Warning,
        BackendStatus::Busy | BackendStatus::Offline => LineStyle::Error,
    }
}

/// State shared between the console and the side panels.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Most recently deployed first.
    pub jobs: Vec<Job>,
    pub models: Vec<AiModel>,
    pub backends: Vec<QuantumBackend>,
    pub authenticated: bool,
}

impl Dashboard {
    pub fn new(models: Vec<AiModel>, backends: Vec<QuantumBackend>, jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            models,
            backends,
            authenticated: false,
        }
    }

    /// The backend status panel: a status table, then a queue depth chart.
    pub fn backend_panel(&self) -> Vec<OutputLine> {
        let mut lines = vec![OutputLine::new("Quantum Backend Status", LineStyle::Heading)];
        let rows: Vec<Vec<String>> = self
            .backends
            .iter()
            .map(|b| {
                vec![
                    b.name.clone(),
                    b.status.to_string(),
                    format!("Q: {}", b.queue),
                    format!("{} qubits", b.qubits),
                ]
            })
            .collect();
        let styles: Vec<LineStyle> = self.backends.iter().map(|b| backend_style(b.status)).collect();
        let headers = ["BACKEND", "STATUS", "QUEUE", "SIZE"].map(String::from);
        lines.extend(render_table(&headers, &rows, &styles));

        let max = self.backends.iter().map(|b| b.queue).max().unwrap_or(0);
        let label_width = self
            .backends
            .iter()
            .map(|b| b.short_name().chars().count())
            .max()
            .unwrap_or(0);
        for b in &self.backends {
            let bar = if max == 0 {
                0
            } else {
                b.queue * QUEUE_BAR_WIDTH / max
            };
            lines.push(OutputLine::new(
                format!(
                    "{:<label_width$} |{} {}",
                    b.short_name(),
                    "#".repeat(bar as usize),
                    b.queue
                ),
                LineStyle::Info,
            ));
        }
        lines
    }

    /// Accept any non-blank API token.
    pub fn authenticate(&mut self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(QccError::Validation("Please enter an API Token.".to_string()));
        }
        self.authenticated = true;
        log::info!("Authenticated with API token");
        Ok(())
    }

    /// Deploy from the model repository panel.
    pub fn deploy(
        &mut self,
        model_name: &str,
        backend: &str,
        prefix: &str,
        rng: &mut StdRng,
    ) -> Result<&Job> {
        if !self.authenticated {
            return Err(QccError::AuthRequired);
        }
        submit_deployment(&mut self.jobs, &self.models, model_name, backend, prefix, rng)
    }
}

/// All mutable application state.
pub struct AppState {
    pub config: QccConfig,
    pub dashboard: Dashboard,
    pub registry: CommandRegistry,
    pub console: ConsoleSession,
    pub terminal: SessionTerminal,
    pub mode: Mode,
    pub rng: StdRng,
    pub running: bool,
}

impl AppState {
    pub fn new(config: QccConfig, rng: StdRng) -> Self {
        let models = if config.models.is_empty() {
            seed::default_models()
        } else {
            config.models.clone()
        };
        let backends = if config.backends.is_empty() {
            seed::default_backends()
        } else {
            config.backends.clone()
        };
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        Self {
            dashboard: Dashboard::new(models, backends, seed::initial_jobs()),
            console: ConsoleSession::new(&config.console),
            terminal: SessionTerminal::new(&config.terminal),
            registry,
            mode: Mode::Console,
            rng,
            running: true,
            config,
        }
    }

    /// Connect the terminal with its pre-populated details, once.
    pub fn handle_mount(&mut self) -> Vec<OutputLine> {
        match self.terminal.mount() {
            Ok(()) => Vec::new(),
            Err(e) => vec![OutputLine::from_error(&e)],
        }
    }

    /// Feed a key to the console, lending it the dashboard state.
    pub fn console_key(&mut self, key: Key) {
        let Self {
            config,
            dashboard,
            registry,
            console,
            rng,
            ..
        } = self;
        let mut env = Environment {
            jobs: &mut dashboard.jobs,
            models: &dashboard.models,
            authenticated: dashboard.authenticated,
            default_backend: &config.console.default_backend,
            job_id_prefix: &config.console.job_id_prefix,
            rng,
        };
        console.handle_key(key, registry, &mut env);
    }

    fn focused_key(&mut self, key: Key) -> Result<()> {
        match self.mode {
            Mode::Console => {
                self.console_key(key);
                Ok(())
            },
            Mode::Terminal => self.terminal.handle_key(key),
        }
    }

    /// Apply one front-end event. Returns notices for the user.
    pub fn handle_event(&mut self, event: AppEvent) -> Vec<OutputLine> {
        match self.apply(event) {
            Ok(notices) => notices,
            Err(e) => vec![OutputLine::from_error(&e)],
        }
    }

    fn apply(&mut self, event: AppEvent) -> Result<Vec<OutputLine>> {
        let mut notices = Vec::new();
        match event {
            AppEvent::Line(text) => {
                for ch in text.chars() {
                    self.focused_key(Key::from_char(ch))?;
                }
                self.focused_key(Key::Enter)?;
            },
            AppEvent::Key(key) => {
                self.focused_key(key)?;
                if self.mode == Mode::Console {
                    notices.push(self.buffer_notice());
                }
            },
            AppEvent::Complete(partial) => {
                self.mode = Mode::Console;
                self.console.set_input(&partial);
                self.console_key(Key::Tab);
                notices.push(self.buffer_notice());
            },
            AppEvent::Focus(mode) => {
                self.mode = mode;
                let name = match mode {
                    Mode::Console => "command console",
                    Mode::Terminal => "SSH terminal",
                };
                notices.push(OutputLine::new(format!("Focus: {name}"), LineStyle::Muted));
            },
            AppEvent::Authenticate(token) => {
                self.dashboard.authenticate(&token)?;
                notices.push(OutputLine::new(
                    "Connection Status: Connected",
                    LineStyle::Success,
                ));
            },
            AppEvent::ListModels => {
                for m in &self.dashboard.models {
                    notices.push(OutputLine::new(
                        format!("{} [{} / {}]", m.name, m.kind, m.format),
                        LineStyle::Accent,
                    ));
                    notices.push(OutputLine::new(
                        format!("  {}", m.description),
                        LineStyle::Muted,
                    ));
                }
            },
            AppEvent::ListBackends => notices.extend(self.dashboard.backend_panel()),
            AppEvent::Deploy(model) => {
                let job = self.dashboard.deploy(
                    &model,
                    &self.config.console.default_backend,
                    &self.config.console.job_id_prefix,
                    &mut self.rng,
                )?;
                notices.push(OutputLine::new(
                    format!("Deployed {} as job {}", job.model, job.id),
                    LineStyle::Success,
                ));
            },
            AppEvent::Export => {
                let json = serde_json::to_string_pretty(&self.dashboard.jobs)?;
                notices.extend(json.lines().map(OutputLine::plain));
            },
            AppEvent::SetHost(host) => self.terminal.set_host(&host)?,
            AppEvent::SetUser(user) => self.terminal.set_user(&user)?,
            AppEvent::SetPassword(password) => self.terminal.set_password(&password)?,
            AppEvent::Connect => {
                self.mode = Mode::Terminal;
                self.terminal.connect()?;
            },
            AppEvent::Help => {
                notices.extend(META_HELP.iter().map(|l| OutputLine::new(*l, LineStyle::Muted)));
            },
            AppEvent::Quit => self.running = false,
            AppEvent::Unknown(cmd) => {
                notices.push(OutputLine::new(
                    format!("Unknown key command ':{cmd}'. Try ':help'."),
                    LineStyle::Warning,
                ));
            },
        }
        Ok(notices)
    }

    fn buffer_notice(&self) -> OutputLine {
        let text = match self.console.history_index() {
            Some(i) => format!(
                "{} {}_  (history {}/{})",
                self.console.prompt(),
                self.console.input(),
                i + 1,
                self.console.history().count()
            ),
            None => format!("{} {}_", self.console.prompt(), self.console.input()),
        };
        OutputLine::new(text, LineStyle::Muted)
    }
}
