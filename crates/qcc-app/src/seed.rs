//! Built-in model catalog, backend list, and the jobs the dashboard starts
//! with.

use qcc_types::backend::{BackendStatus, QuantumBackend};
use qcc_types::job::{AiModel, Job, JobStatus, ModelFormat, ModelKind};

pub fn default_models() -> Vec<AiModel> {
    let model = |name: &str, kind, format, description: &str| AiModel {
        name: name.to_string(),
        kind,
        format,
        description: description.to_string(),
    };
    vec![
        model(
            "Llama-3-8B-Quantum",
            ModelKind::Llm,
            ModelFormat::Safetensors,
            "8B instruction model with quantum-assisted attention heads.",
        ),
        model(
            "Mistral-7B-Q4",
            ModelKind::Llm,
            ModelFormat::Gguf,
            "4-bit quantized 7B model for hybrid inference.",
        ),
        model(
            "QSVM-Kernel-v1",
            ModelKind::QuantumKernel,
            ModelFormat::Qpy,
            "Support vector classifier over a ZZ feature map.",
        ),
        model(
            "VQE-Molecular-H2",
            ModelKind::VariationalCircuit,
            ModelFormat::Qpy,
            "Variational eigensolver for the H2 ground state.",
        ),
    ]
}

pub fn default_backends() -> Vec<QuantumBackend> {
    let backend = |name: &str, status, queue, qubits| QuantumBackend {
        name: name.to_string(),
        status,
        queue,
        qubits,
    };
    vec![
        backend("ibm_brisbane", BackendStatus::Online, 12, 127),
        backend("ibm_osaka", BackendStatus::Busy, 48, 127),
        backend("ibm_kyoto", BackendStatus::Calibrating, 0, 127),
        backend("ibmq_manila", BackendStatus::Offline, 0, 5),
    ]
}

pub fn initial_jobs() -> Vec<Job> {
    let job = |id: &str, model: &str, backend: &str, status, submitted: &str| Job {
        id: id.to_string(),
        model: model.to_string(),
        backend: backend.to_string(),
        status,
        submitted: submitted.to_string(),
    };
    vec![
        job(
            "cq8x2k4m1p7z",
            "VQE-Molecular-H2",
            "ibm_kyoto",
            JobStatus::Running,
            "5 mins ago",
        ),
        job(
            "cq3n9v6b0w2r",
            "QSVM-Kernel-v1",
            "ibm_osaka",
            JobStatus::Completed,
            "1 hour ago",
        ),
        job(
            "cq5t1y8u4i6o",
            "Llama-3-8B-Quantum",
            "ibm_brisbane",
            JobStatus::Failed,
            "3 hours ago",
        ),
    ]
}
