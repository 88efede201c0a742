//! Quantum backends shown on the status panel.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Availability of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackendStatus {
    Online,
    Offline,
    Calibrating,
    Busy,
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "Online"),
            Self::Offline => write!(f, "Offline"),
            Self::Calibrating => write!(f, "Calibrating"),
            Self::Busy => write!(f, "Busy"),
        }
    }
}

/// A simulated quantum processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantumBackend {
    pub name: String,
    pub status: BackendStatus,
    /// Jobs waiting ahead of a new submission.
    pub queue: u32,
    pub qubits: u32,
}

impl QuantumBackend {
    /// Name without the vendor prefix, as used for the queue chart.
    pub fn short_name(&self) -> &str {
        self.name
            .strip_prefix("ibmq_")
            .or_else(|| self.name.strip_prefix("ibm_"))
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(name: &str) -> QuantumBackend {
        QuantumBackend {
            name: name.to_string(),
            status: BackendStatus::Online,
            queue: 0,
            qubits: 5,
        }
    }

    #[test]
    fn short_name_strips_vendor_prefix() {
        assert_eq!(backend("ibm_osaka").short_name(), "osaka");
        assert_eq!(backend("ibmq_manila").short_name(), "manila");
        assert_eq!(backend("rigetti_ankaa").short_name(), "rigetti_ankaa");
    }

    #[test]
    fn status_names_round_trip_through_toml() {
        let b: QuantumBackend =
            toml::from_str("name = \"x\"\nstatus = \"Calibrating\"\nqueue = 3\nqubits = 27\n")
                .unwrap();
        assert_eq!(b.status, BackendStatus::Calibrating);
        assert_eq!(b.status.to_string(), "Calibrating");
    }
}
