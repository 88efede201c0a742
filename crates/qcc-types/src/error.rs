//! Error types for QCC.
//!
//! Nothing here is fatal to a console or terminal session. Every variant
//! except the configuration ones is rendered to the user as a single line.

use std::io;

/// Errors produced by the QCC crates.
#[derive(Debug, thiserror::Error)]
pub enum QccError {
    /// A command was invoked without its required arguments.
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Error: Model '{0}' not found in repository.")]
    ModelNotFound(String),

    #[error("Error: Job '{0}' not found.")]
    JobNotFound(String),

    #[error("Authentication required. Please connect with your API Token first.")]
    AuthRequired,

    #[error("Command not found: \"{0}\". Type \"help\".")]
    UnknownCommand(String),

    /// A form field was left empty (connect host/user, API token).
    #[error("{0}")]
    Validation(String),

    /// An operation was attempted in the wrong connection phase.
    #[error("session error: {0}")]
    Session(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used to pick how an error line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    NotFound,
    Auth,
    Unrecognized,
    Validation,
    Internal,
}

impl QccError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_) => ErrorKind::Usage,
            Self::ModelNotFound(_) | Self::JobNotFound(_) => ErrorKind::NotFound,
            Self::AuthRequired => ErrorKind::Auth,
            Self::UnknownCommand(_) => ErrorKind::Unrecognized,
            Self::Validation(_) | Self::Session(_) => ErrorKind::Validation,
            Self::Config(_) | Self::Io(_) | Self::TomlParse(_) | Self::Json(_) => {
                ErrorKind::Internal
            },
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, QccError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_error_display() {
        let e = QccError::Usage("deploy <model_name>".into());
        assert_eq!(format!("{e}"), "Usage: deploy <model_name>");
    }

    #[test]
    fn model_not_found_display() {
        let e = QccError::ModelNotFound("gpt-q".into());
        assert_eq!(format!("{e}"), "Error: Model 'gpt-q' not found in repository.");
    }

    #[test]
    fn job_not_found_display() {
        let e = QccError::JobNotFound("cq123".into());
        assert_eq!(format!("{e}"), "Error: Job 'cq123' not found.");
    }

    #[test]
    fn auth_required_display() {
        let msg = format!("{}", QccError::AuthRequired);
        assert!(msg.starts_with("Authentication required."));
    }

    #[test]
    fn unknown_command_display() {
        let e = QccError::UnknownCommand("Foo".into());
        assert_eq!(format!("{e}"), "Command not found: \"Foo\". Type \"help\".");
    }

    #[test]
    fn validation_display_is_bare() {
        let e = QccError::Validation("Please enter an API Token.".into());
        assert_eq!(format!("{e}"), "Please enter an API Token.");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let e: QccError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("gone"));
        assert_eq!(e.kind(), ErrorKind::Internal);
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("this is [[[not valid toml").unwrap_err();
        let e: QccError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let e: QccError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn kinds() {
        assert_eq!(QccError::Usage(String::new()).kind(), ErrorKind::Usage);
        assert_eq!(QccError::JobNotFound(String::new()).kind(), ErrorKind::NotFound);
        assert_eq!(QccError::ModelNotFound(String::new()).kind(), ErrorKind::NotFound);
        assert_eq!(QccError::AuthRequired.kind(), ErrorKind::Auth);
        assert_eq!(QccError::UnknownCommand(String::new()).kind(), ErrorKind::Unrecognized);
        assert_eq!(QccError::Session(String::new()).kind(), ErrorKind::Validation);
    }
}
