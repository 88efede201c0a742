//! Built-in commands for the command console.

use qcc_types::error::{QccError, Result};
use qcc_types::job::{JobStatus, submit_deployment};
use qcc_types::output::{LineStyle, OutputLine};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register all built-in commands into a registry.
///
/// Registration order is the order `help` lists them in.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(HelpCmd));
    reg.register(Box::new(ClearCmd));
    reg.register(Box::new(WelcomeCmd));
    reg.register(Box::new(DeployCmd));
    reg.register(Box::new(JobsCmd));
    reg.register(Box::new(StatusCmd));
}

const BANNER_ART: [&str; 6] = [
    " ██████╗ ██╗   ██╗ █████╗ ███╗   ██╗████████╗███╗   ███╗",
    "██╔═══██╗██║   ██║██╔══██╗████╗  ██║╚══██╔══╝████╗ ████║",
    "██║   ██║██║   ██║███████║██╔██╗ ██║   ██║   ██╔████╔██║",
    "██║   ██║██║   ██║██╔══██║██║╚██╗██║   ██║   ██║╚██╔╝██║",
    "╚██████╔╝╚██████╔╝██║  ██║██║ ╚████║   ██║   ██║ ╚═╝ ██║",
    " ╚═════╝  ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═══╝   ╚═╝   ╚═╝     ╚═╝",
];

/// The startup banner.
pub fn welcome_banner() -> Vec<OutputLine> {
    let mut lines: Vec<OutputLine> = BANNER_ART
        .iter()
        .map(|row| OutputLine::new(*row, LineStyle::Accent))
        .collect();
    lines.push(OutputLine::plain(
        "Quantum AI Command Console v2.0 Initialized.",
    ));
    lines.push(OutputLine::new(
        "Type 'help' for a list of available commands.",
        LineStyle::Muted,
    ));
    lines
}

/// Style used to show a job status.
pub fn status_style(status: JobStatus) -> LineStyle {
    match status {
        JobStatus::Completed => LineStyle::Success,
        JobStatus::Running => LineStyle::Info,
        JobStatus::Pending => LineStyle::Warning,
        JobStatus::Failed => LineStyle::Error,
    }
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

struct HelpCmd;
impl Command for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Displays a list of all available commands."
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        // The registry owns the listing; it expands this signal.
        Ok(CommandOutput::Help)
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clears the console screen."
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}

// ---------------------------------------------------------------------------
// welcome
// ---------------------------------------------------------------------------

struct WelcomeCmd;
impl Command for WelcomeCmd {
    fn name(&self) -> &str {
        "welcome"
    }
    fn description(&self) -> &str {
        "Displays the welcome banner."
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Lines(welcome_banner()))
    }
}

// ---------------------------------------------------------------------------
// deploy
// ---------------------------------------------------------------------------

struct DeployCmd;
impl Command for DeployCmd {
    fn name(&self) -> &str {
        "deploy"
    }
    fn description(&self) -> &str {
        "Deploys an AI model to a quantum backend."
    }
    fn usage(&self) -> Option<&str> {
        Some("<model_name>")
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if !env.authenticated {
            return Err(QccError::AuthRequired);
        }
        let Some(&name) = args.first() else {
            return Err(QccError::Usage("deploy <model_name>".to_string()));
        };
        let job = submit_deployment(
            env.jobs,
            env.models,
            name,
            env.default_backend,
            env.job_id_prefix,
            &mut *env.rng,
        )?;
        let msg = format!(
            "Successfully submitted job {} to deploy model '{}'.",
            job.id, job.model
        );
        Ok(CommandOutput::Lines(vec![OutputLine::new(
            msg,
            LineStyle::Success,
        )]))
    }
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

struct JobsCmd;
impl Command for JobsCmd {
    fn name(&self) -> &str {
        "jobs"
    }
    fn description(&self) -> &str {
        "Lists all current and recent jobs."
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let rows = env
            .jobs
            .iter()
            .map(|j| vec![j.id.clone(), j.model.clone(), j.status.to_string()])
            .collect();
        // Each row takes its job's status colour.
        let styles = env.jobs.iter().map(|j| status_style(j.status)).collect();
        Ok(CommandOutput::Table {
            headers: vec!["JOB ID".into(), "MODEL".into(), "STATUS".into()],
            rows,
            styles,
        })
    }
}

// ---------------------------------------------------------------------------
// status
// ---------------------------------------------------------------------------

struct StatusCmd;
impl Command for StatusCmd {
    fn name(&self) -> &str {
        "status"
    }
    fn description(&self) -> &str {
        "Gets the status of a specific job."
    }
    fn usage(&self) -> Option<&str> {
        Some("<job_id>")
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let Some(&id) = args.first() else {
            return Err(QccError::Usage("status <job_id>".to_string()));
        };
        let job = env
            .jobs
            .iter()
            .find(|j| j.id == id)
            .ok_or_else(|| QccError::JobNotFound(id.to_string()))?;

        let field = |label: &str, value: &str| OutputLine::plain(format!("{label:<11}{value}"));
        Ok(CommandOutput::Lines(vec![
            field("Job ID:", &job.id),
            field("Model:", &job.model),
            field("Backend:", &job.backend),
            field("Submitted:", &job.submitted),
            OutputLine::new(
                format!("{:<11}{}", "Status:", job.status),
                status_style(job.status),
            ),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcc_types::job::{AiModel, Job, ModelFormat, ModelKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> Vec<AiModel> {
        vec![
            AiModel {
                name: "QAOA-MaxCut-v2".into(),
                kind: ModelKind::VariationalCircuit,
                format: ModelFormat::Qpy,
                description: "MaxCut solver".into(),
            },
            AiModel {
                name: "Llama-3-8B-Q".into(),
                kind: ModelKind::Llm,
                format: ModelFormat::Gguf,
                description: "Quantized LLM".into(),
            },
        ]
    }

    fn seed_jobs() -> Vec<Job> {
        vec![Job {
            id: "cq7f3k2p9x1a".into(),
            model: "Llama-3-8B-Q".into(),
            backend: "ibm_kyoto".into(),
            status: JobStatus::Completed,
            submitted: "2 hours ago".into(),
        }]
    }

    fn setup() -> CommandRegistry {
        let mut reg = CommandRegistry::new();
        register_builtins(&mut reg);
        reg
    }

    fn exec(
        reg: &CommandRegistry,
        jobs: &mut Vec<Job>,
        authenticated: bool,
        line: &str,
    ) -> Result<CommandOutput> {
        let models = catalog();
        let mut rng = StdRng::seed_from_u64(99);
        let mut env = Environment {
            jobs,
            models: &models,
            authenticated,
            default_backend: "ibm_brisbane",
            job_id_prefix: "cq",
            rng: &mut rng,
        };
        reg.execute(line, &mut env)
    }

    fn texts(out: CommandOutput) -> Vec<String> {
        match out {
            CommandOutput::Lines(lines) => lines.into_iter().map(|l| l.text).collect(),
            other => panic!("expected lines, got {other:?}"),
        }
    }

    #[test]
    fn builtins_registered_in_order() {
        let reg = setup();
        assert_eq!(
            reg.names().collect::<Vec<_>>(),
            vec!["help", "clear", "welcome", "deploy", "jobs", "status"]
        );
    }

    #[test]
    fn help_lists_each_command_once_in_order() {
        let reg = setup();
        let mut jobs = Vec::new();
        let lines = texts(exec(&reg, &mut jobs, false, "help").unwrap());
        let names: Vec<&str> = reg.names().collect();
        assert_eq!(lines.len(), names.len() + 1);
        for (line, name) in lines[1..].iter().zip(&names) {
            assert_eq!(line.split_whitespace().next(), Some(*name));
        }
        for name in &names {
            let count = lines
                .iter()
                .filter(|l| l.split_whitespace().next() == Some(*name))
                .count();
            assert_eq!(count, 1, "{name} listed {count} times");
        }
    }

    #[test]
    fn help_shows_usage() {
        let reg = setup();
        let mut jobs = Vec::new();
        let lines = texts(exec(&reg, &mut jobs, false, "help").unwrap());
        let deploy = lines.iter().find(|l| l.starts_with("deploy")).unwrap();
        assert!(deploy.contains("<model_name>"));
        assert!(deploy.ends_with("- Deploys an AI model to a quantum backend."));
    }

    #[test]
    fn clear_returns_clear() {
        let reg = setup();
        let mut jobs = Vec::new();
        assert_eq!(
            exec(&reg, &mut jobs, false, "clear").unwrap(),
            CommandOutput::Clear
        );
    }

    #[test]
    fn welcome_renders_banner() {
        let reg = setup();
        let mut jobs = Vec::new();
        let lines = texts(exec(&reg, &mut jobs, false, "welcome").unwrap());
        assert_eq!(lines.len(), BANNER_ART.len() + 2);
        assert!(lines.iter().any(|l| l.contains("v2.0 Initialized")));
    }

    #[test]
    fn deploy_requires_auth() {
        let reg = setup();
        let mut jobs = seed_jobs();
        let err = exec(&reg, &mut jobs, false, "deploy QAOA-MaxCut-v2").unwrap_err();
        assert!(matches!(err, QccError::AuthRequired));
        assert_eq!(jobs, seed_jobs());
    }

    #[test]
    fn deploy_auth_checked_before_usage() {
        let reg = setup();
        let mut jobs = Vec::new();
        let err = exec(&reg, &mut jobs, false, "deploy").unwrap_err();
        assert!(matches!(err, QccError::AuthRequired));
    }

    #[test]
    fn deploy_no_args() {
        let reg = setup();
        let mut jobs = Vec::new();
        let err = exec(&reg, &mut jobs, true, "deploy").unwrap_err();
        assert_eq!(err.to_string(), "Usage: deploy <model_name>");
        assert!(jobs.is_empty());
    }

    #[test]
    fn deploy_unknown_model() {
        let reg = setup();
        let mut jobs = Vec::new();
        let err = exec(&reg, &mut jobs, true, "deploy qaoa-maxcut-v2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: Model 'qaoa-maxcut-v2' not found in repository."
        );
        assert!(jobs.is_empty());
    }

    #[test]
    fn deploy_prepends_pending_job() {
        let reg = setup();
        let mut jobs = seed_jobs();
        let lines = texts(exec(&reg, &mut jobs, true, "deploy QAOA-MaxCut-v2").unwrap());
        assert_eq!(jobs.len(), 2);
        let job = &jobs[0];
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.model, "QAOA-MaxCut-v2");
        assert_eq!(job.backend, "ibm_brisbane");
        assert_eq!(job.submitted, "Just now");
        assert!(job.id.starts_with("cq"));
        assert_eq!(
            lines,
            vec![format!(
                "Successfully submitted job {} to deploy model 'QAOA-MaxCut-v2'.",
                job.id
            )]
        );
        assert_eq!(jobs[1], seed_jobs()[0]);
    }

    #[test]
    fn jobs_table_in_list_order() {
        let reg = setup();
        let mut jobs = seed_jobs();
        exec(&reg, &mut jobs, true, "deploy Llama-3-8B-Q").unwrap();
        match exec(&reg, &mut jobs, true, "jobs").unwrap() {
            CommandOutput::Table {
                headers,
                rows,
                styles,
            } => {
                assert_eq!(headers, vec!["JOB ID", "MODEL", "STATUS"]);
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0][0], jobs[0].id);
                assert_eq!(rows[0][2], "Pending");
                assert_eq!(styles, vec![LineStyle::Warning, LineStyle::Success]);
                assert_eq!(rows[1][0], "cq7f3k2p9x1a");
                assert_eq!(rows[1][2], "Completed");
            },
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn jobs_empty_table() {
        let reg = setup();
        let mut jobs = Vec::new();
        match exec(&reg, &mut jobs, false, "jobs").unwrap() {
            CommandOutput::Table { rows, .. } => assert!(rows.is_empty()),
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn status_no_args() {
        let reg = setup();
        let mut jobs = seed_jobs();
        let err = exec(&reg, &mut jobs, false, "status").unwrap_err();
        assert_eq!(err.to_string(), "Usage: status <job_id>");
    }

    #[test]
    fn status_unknown_job_leaves_state() {
        let reg = setup();
        let mut jobs = seed_jobs();
        let err = exec(&reg, &mut jobs, true, "status cqnope").unwrap_err();
        assert_eq!(err.to_string(), "Error: Job 'cqnope' not found.");
        assert_eq!(jobs, seed_jobs());
    }

    #[test]
    fn status_shows_all_fields() {
        let reg = setup();
        let mut jobs = seed_jobs();
        match exec(&reg, &mut jobs, false, "status cq7f3k2p9x1a").unwrap() {
            CommandOutput::Lines(lines) => {
                assert_eq!(lines.len(), 5);
                assert!(lines[0].text.ends_with("cq7f3k2p9x1a"));
                assert!(lines[1].text.ends_with("Llama-3-8B-Q"));
                assert!(lines[2].text.ends_with("ibm_kyoto"));
                assert!(lines[3].text.ends_with("2 hours ago"));
                assert!(lines[4].text.ends_with("Completed"));
                assert_eq!(lines[4].style, LineStyle::Success);
            },
            other => panic!("expected lines, got {other:?}"),
        }
    }

    #[test]
    fn status_styles() {
        assert_eq!(status_style(JobStatus::Pending), LineStyle::Warning);
        assert_eq!(status_style(JobStatus::Running), LineStyle::Info);
        assert_eq!(status_style(JobStatus::Failed), LineStyle::Error);
    }
}
