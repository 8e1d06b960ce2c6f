//! Types for process execution.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default exit codes accepted as success.
pub const DEFAULT_VALID_EXIT_CODES: &[i32] = &[0];

/// Default markers whose presence in the captured output means failure.
pub const DEFAULT_ERROR_MARKERS: &[&str] = &["ERROR"];

/// Options controlling how an external command is executed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Maximum run time in seconds. Absent means no timeout.
    #[serde(default)]
    pub timeout: Option<f64>,

    /// Working directory for the child process.
    #[serde(default)]
    pub working_directory: Option<PathBuf>,

    /// When present, replaces the inherited environment entirely.
    #[serde(default)]
    pub environment_variables: Option<HashMap<String, String>>,
}

/// Captured result of one external command execution.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Exit code, absent when the child was terminated by a signal.
    pub exit_code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,

    /// Wall-clock time the run took.
    pub elapsed: Duration,
}

impl ProcessOutcome {
    /// Classifies this outcome as success or failure.
    ///
    /// Success requires the exit code to be a member of
    /// `valid_exit_codes` AND none of `error_markers` to occur as a
    /// substring of the captured standard output. An empty code set
    /// disables the exit-code check; an empty marker set disables the
    /// output scan.
    pub fn is_successful(&self, valid_exit_codes: &[i32], error_markers: &[&str]) -> bool {
        if !valid_exit_codes.is_empty() {
            match self.exit_code {
                Some(code) if valid_exit_codes.contains(&code) => {}
                _ => return false,
            }
        }
        error_markers
            .iter()
            .all(|marker| !self.stdout.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(exit_code: Option<i32>, stdout: &str) -> ProcessOutcome {
        ProcessOutcome {
            exit_code,
            stdout: stdout.to_string(),
            stderr: String::new(),
            elapsed: Duration::from_millis(1),
        }
    }

    #[test]
    fn test_success_requires_valid_exit_code() {
        let failed = outcome(Some(1), "all good");
        assert!(!failed.is_successful(DEFAULT_VALID_EXIT_CODES, DEFAULT_ERROR_MARKERS));

        let ok = outcome(Some(0), "all good");
        assert!(ok.is_successful(DEFAULT_VALID_EXIT_CODES, DEFAULT_ERROR_MARKERS));
    }

    #[test]
    fn test_error_marker_fails_even_with_exit_zero() {
        let tainted = outcome(Some(0), "ERROR: truncated input");
        assert!(!tainted.is_successful(DEFAULT_VALID_EXIT_CODES, DEFAULT_ERROR_MARKERS));
    }

    #[test]
    fn test_empty_exit_code_set_disables_code_check() {
        let killed = outcome(Some(137), "done");
        assert!(killed.is_successful(&[], DEFAULT_ERROR_MARKERS));
    }

    #[test]
    fn test_empty_marker_set_disables_output_scan() {
        let noisy = outcome(Some(0), "ERROR everywhere");
        assert!(noisy.is_successful(DEFAULT_VALID_EXIT_CODES, &[]));
    }

    #[test]
    fn test_signal_termination_is_failure_with_code_check() {
        let signalled = outcome(None, "");
        assert!(!signalled.is_successful(DEFAULT_VALID_EXIT_CODES, DEFAULT_ERROR_MARKERS));
        assert!(signalled.is_successful(&[], DEFAULT_ERROR_MARKERS));
    }

    #[test]
    fn test_alternate_valid_codes() {
        let skipped = outcome(Some(99), "");
        assert!(skipped.is_successful(&[0, 98, 99], &[]));
        assert!(!skipped.is_successful(&[0], &[]));
    }

    #[test]
    fn test_run_options_from_json() {
        let options: RunOptions = serde_json::from_value(serde_json::json!({
            "timeout": 2.5,
            "working_directory": "/srv/work",
        }))
        .unwrap();
        assert_eq!(options.timeout, Some(2.5));
        assert_eq!(options.working_directory, Some(PathBuf::from("/srv/work")));
        assert!(options.environment_variables.is_none());
    }
}
