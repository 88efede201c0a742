//! Simulated deployment jobs and the model catalog.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QccError, Result};

/// Backend every deploy is submitted to unless configured otherwise.
pub const DEFAULT_BACKEND: &str = "ibm_brisbane";

/// Prefix prepended to generated job ids.
pub const DEFAULT_JOB_PREFIX: &str = "cq";

/// Submitted label attached to freshly created jobs.
pub const SUBMITTED_JUST_NOW: &str = "Just now";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 10;

/// Lifecycle status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Running => write!(f, "Running"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// A simulated deployment task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub model: String,
    pub backend: String,
    pub status: JobStatus,
    pub submitted: String,
}

impl Job {
    /// A freshly deployed job: status `Pending`, submitted "Just now".
    pub fn pending(id: String, model: &str, backend: &str) -> Self {
        Self {
            id,
            model: model.to_string(),
            backend: backend.to_string(),
            status: JobStatus::Pending,
            submitted: SUBMITTED_JUST_NOW.to_string(),
        }
    }
}

/// Generate a job id: `prefix` followed by ten random base-36 characters.
///
/// Uniqueness is probabilistic only.
pub fn generate_job_id<R: Rng + ?Sized>(rng: &mut R, prefix: &str) -> String {
    let mut id = String::with_capacity(prefix.len() + ID_SUFFIX_LEN);
    id.push_str(prefix);
    for _ in 0..ID_SUFFIX_LEN {
        let idx = rng.random_range(0..ID_ALPHABET.len());
        id.push(ID_ALPHABET[idx] as char);
    }
    id
}

/// Model family shown in the repository listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "LLM")]
    Llm,
    #[serde(rename = "Quantum Kernel")]
    QuantumKernel,
    #[serde(rename = "Variational Circuit")]
    VariationalCircuit,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Llm => write!(f, "LLM"),
            Self::QuantumKernel => write!(f, "Quantum Kernel"),
            Self::VariationalCircuit => write!(f, "Variational Circuit"),
        }
    }
}

/// Serialized weight / circuit format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFormat {
    #[serde(rename = "safetensors")]
    Safetensors,
    #[serde(rename = "GGUF")]
    Gguf,
    #[serde(rename = "QPY")]
    Qpy,
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safetensors => write!(f, "safetensors"),
            Self::Gguf => write!(f, "GGUF"),
            Self::Qpy => write!(f, "QPY"),
        }
    }
}

/// An entry in the model repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiModel {
    pub name: String,
    pub kind: ModelKind,
    pub format: ModelFormat,
    pub description: String,
}

/// Find a model by exact (case-sensitive) name.
pub fn find_model<'a>(models: &'a [AiModel], name: &str) -> Option<&'a AiModel> {
    models.iter().find(|m| m.name == name)
}

/// Create a pending job for `model_name` and put it at the front of `jobs`.
///
/// Callers check authentication first; this only resolves the model.
pub fn submit_deployment<'a, R: Rng + ?Sized>(
    jobs: &'a mut Vec<Job>,
    models: &[AiModel],
    model_name: &str,
    backend: &str,
    prefix: &str,
    rng: &mut R,
) -> Result<&'a Job> {
    let model = find_model(models, model_name)
        .ok_or_else(|| QccError::ModelNotFound(model_name.to_string()))?;
    let job = Job::pending(generate_job_id(rng, prefix), &model.name, backend);
    log::info!("Submitted job {} for model '{}'", job.id, job.model);
    jobs.insert(0, job);
    Ok(&jobs[0])
}
