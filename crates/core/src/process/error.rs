//! Error types for process execution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The command vector was empty.
    #[error("command must contain at least an executable path")]
    EmptyCommand,

    /// The executable could not be found.
    #[error("executable not found: {path}")]
    ExecutableNotFound { path: PathBuf },

    /// The run exceeded the configured timeout and the child was
    /// terminated.
    #[error("process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: f64 },

    /// I/O error while spawning or capturing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessError {
    /// Whether this error is worth retrying from the caller's side.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Io(_))
    }
}
