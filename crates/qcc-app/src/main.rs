//! QCC dashboard desktop entry point.
//!
//! A line-oriented front end for the command console and the SSH session
//! terminal. Plain lines are typed into the focused widget; lines starting
//! with `:` drive the rest of the dashboard (`:help` lists them).
//! The frame loop advances the terminal's timers between inputs.

mod app_state;
mod input;
mod render;
mod seed;

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use app_state::AppState;
use qcc_types::config::QccConfig;
use render::Renderer;

const FRAME: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg, QCC_CONFIG env var, or built-in defaults.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("QCC_CONFIG").ok())
    {
        Some(path) => QccConfig::load(Path::new(&path))
            .with_context(|| format!("failed to load config from {path}"))?,
        None => QccConfig::default(),
    };
    log::info!(
        "Starting QCC dashboard ({} models configured)",
        config.models.len()
    );

    let mut state = AppState::new(config, StdRng::from_os_rng());
    log::info!(
        "Registered {} console commands, {} models, {} backends",
        state.registry.len(),
        state.dashboard.models.len(),
        state.dashboard.backends.len()
    );
    log::debug!(
        "Console commands: {}",
        state.registry.names().collect::<Vec<_>>().join(", ")
    );

    // The terminal connects with its pre-populated details on startup.
    for notice in state.handle_mount() {
        log::warn!("{notice}");
    }

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut renderer = Renderer::from_env();
    let stdout = io::stdout();
    let mut last = Instant::now();

    'running: loop {
        let mut lines = Vec::new();
        match rx.recv_timeout(FRAME) {
            Ok(raw) => {
                let notices = state.handle_event(input::parse_line(&raw));
                lines.extend(renderer.notices(&notices));
            },
            Err(RecvTimeoutError::Timeout) => {},
            Err(RecvTimeoutError::Disconnected) => break 'running,
        }

        let now = Instant::now();
        state.terminal.tick(now - last);
        last = now;

        lines.extend(renderer.frame(&state));
        if !lines.is_empty() {
            let mut out = stdout.lock();
            for line in &lines {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }

        if !state.running {
            break 'running;
        }
    }

    log::info!("QCC dashboard shut down cleanly");
    Ok(())
}
