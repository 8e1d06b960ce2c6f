//! Shared tool-invocation pipeline.
//!
//! Every external-tool processor runs the same choreography:
//! materialize the payload into a scoped temporary file, invoke the
//! tool over it, classify the outcome, and read the rewritten file
//! back. The temporary file is released on every exit path.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, error};

use crate::media::MediaBinary;
use crate::metrics;
use crate::process::{ProcessRunner, RunOptions};
use crate::tmpfile::{TempFile, TempFileManager};

use super::error::PostProcessError;

/// One external-tool run over one payload.
pub(crate) struct ToolInvocation<'a, F> {
    pub processor: &'a str,
    pub temp_files: &'a TempFileManager,
    pub binary: &'a MediaBinary,
    pub temp_dir_override: Option<&'a Path>,
    pub run_options: &'a RunOptions,
    pub valid_exit_codes: &'a [i32],
    pub error_markers: &'a [&'a str],
    pub build_command: F,
}

impl<F> ToolInvocation<'_, F>
where
    F: FnOnce(&Path) -> Vec<String>,
{
    /// Runs the tool and returns the rewritten content.
    pub(crate) async fn run(self) -> Result<Vec<u8>, PostProcessError> {
        let start = Instant::now();
        let processor = self.processor;

        let result = self.invoke().await;

        let label = if result.is_ok() { "ok" } else { "failed" };
        metrics::POST_PROCESS_RUNS
            .with_label_values(&[processor, label])
            .inc();
        metrics::POST_PROCESS_DURATION
            .with_label_values(&[processor])
            .observe(start.elapsed().as_secs_f64());

        result
    }

    async fn invoke(self) -> Result<Vec<u8>, PostProcessError> {
        let temp = self
            .temp_files
            .acquire(self.temp_dir_override, self.processor)?;
        let result = self.execute(&temp).await;
        temp.release();
        result
    }

    async fn execute(self, temp: &TempFile) -> Result<Vec<u8>, PostProcessError> {
        self.temp_files.materialize(self.binary, temp).await?;

        let command = (self.build_command)(temp.path());
        debug!(
            processor = self.processor,
            command = ?command,
            "invoking post-process tool"
        );

        let outcome = ProcessRunner::new().run(&command, self.run_options).await?;

        if !outcome.is_successful(self.valid_exit_codes, self.error_markers) {
            error!(
                processor = self.processor,
                exit_code = ?outcome.exit_code,
                stdout_bytes = outcome.stdout.len(),
                stderr_bytes = outcome.stderr.len(),
                "post-process tool reported failure"
            );
            return Err(PostProcessError::ProcessFailed {
                processor: self.processor.to_string(),
                exit_code: outcome.exit_code,
                stdout: outcome.stdout,
                stderr: outcome.stderr,
            });
        }

        Ok(tokio::fs::read(temp.path()).await?)
    }
}
