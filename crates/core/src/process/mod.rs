//! External process execution.
//!
//! [`ProcessRunner`] spawns an external command with optional timeout,
//! working directory, and environment replacement, capturing exit code
//! and output into a [`ProcessOutcome`]. Success is a separate
//! classification step combining exit-code membership with an
//! error-marker scan of the captured output.

mod error;
mod runner;
mod types;

pub use error::ProcessError;
pub use runner::ProcessRunner;
pub use types::{ProcessOutcome, RunOptions, DEFAULT_ERROR_MARKERS, DEFAULT_VALID_EXIT_CODES};
