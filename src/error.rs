//! Fatal errors that abort a check run before per-task validation

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ErrorKind;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("Failed to read task list '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No tasks found in either the active or the completed task table")]
    NoTasksFound,

    #[error("Invalid task ID format '{id}' in task table at line {line}")]
    InvalidTableId { id: String, line: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
}

impl LintError {
    /// Finding kind this failure is reported as
    pub fn kind(&self) -> ErrorKind {
        match self {
            LintError::Io { .. } => ErrorKind::IoFailure,
            LintError::NoTasksFound => ErrorKind::NoTasksFound,
            LintError::InvalidTableId { .. } => ErrorKind::InvalidIdFormat,
            LintError::InvalidConfig(_) | LintError::InvalidPattern { .. } => {
                ErrorKind::InvalidConfig
            }
        }
    }
}
