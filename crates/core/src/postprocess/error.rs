//! Error types for the post-processing pipeline.

use thiserror::Error;

use crate::process::ProcessError;
use crate::tmpfile::TempFileError;

/// Errors that can occur while post-processing a payload.
#[derive(Debug, Error)]
pub enum PostProcessError {
    /// A per-call option is out of range, ill-typed, or conflicts with
    /// another option. Raised before any resource is touched.
    #[error("invalid post-processor option: {reason}")]
    InvalidOption { reason: String },

    /// The external tool ran but was classified as failed.
    #[error("post-processing with \"{processor}\" failed (exit code {exit_code:?})")]
    ProcessFailed {
        processor: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Temporary file acquisition or materialization failed.
    #[error("temporary file error: {0}")]
    TempFile(#[from] TempFileError),

    /// Spawning or supervising the external tool failed.
    #[error("process error: {0}")]
    Process(#[from] ProcessError),

    /// I/O error reading back the processed content.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PostProcessError {
    /// Creates an invalid-option error.
    pub fn invalid_option(reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            reason: reason.into(),
        }
    }

    /// Whether the caller may reasonably retry the call as-is.
    ///
    /// Option errors are not retryable without new options; tool
    /// failures and timeouts may be transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ProcessFailed { .. } => true,
            Self::Process(err) => err.is_retryable(),
            _ => false,
        }
    }
}
