//! Process runner implementation.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::error::ProcessError;
use super::types::{ProcessOutcome, RunOptions};

/// Executes external commands with output capture, timeout, and
/// environment control.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new runner.
    pub fn new() -> Self {
        Self
    }

    /// Runs `command` (executable path first) to completion.
    ///
    /// Suspends the calling task until the child exits or the timeout
    /// elapses; on timeout the child is killed and the call fails with
    /// [`ProcessError::Timeout`].
    pub async fn run(
        &self,
        command: &[String],
        options: &RunOptions,
    ) -> Result<ProcessOutcome, ProcessError> {
        let (program, args) = command.split_first().ok_or(ProcessError::EmptyCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &options.working_directory {
            cmd.current_dir(dir);
        }
        if let Some(env) = &options.environment_variables {
            cmd.env_clear();
            cmd.envs(env);
        }

        debug!(command = ?command, timeout = ?options.timeout, "running external command");

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ProcessError::ExecutableNotFound {
                    path: PathBuf::from(program),
                }
            } else {
                ProcessError::Io(err)
            }
        })?;

        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();

        let wait_for_exit = async {
            let read_stdout = async {
                let mut buf = Vec::new();
                if let Some(mut pipe) = stdout_pipe {
                    pipe.read_to_end(&mut buf).await?;
                }
                Ok::<Vec<u8>, std::io::Error>(buf)
            };
            let read_stderr = async {
                let mut buf = Vec::new();
                if let Some(mut pipe) = stderr_pipe {
                    pipe.read_to_end(&mut buf).await?;
                }
                Ok::<Vec<u8>, std::io::Error>(buf)
            };
            let (stdout, stderr) = tokio::try_join!(read_stdout, read_stderr)?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, stdout, stderr))
        };

        let waited = match options.timeout {
            Some(secs) => match timeout(Duration::from_secs_f64(secs), wait_for_exit).await {
                Ok(result) => result,
                Err(_) => {
                    let _ = child.kill().await;
                    return Err(ProcessError::Timeout { timeout_secs: secs });
                }
            },
            None => wait_for_exit.await,
        };

        let (status, stdout, stderr) = waited?;
        let outcome = ProcessOutcome {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
            elapsed: start.elapsed(),
        };

        debug!(
            exit_code = ?outcome.exit_code,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "external command finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_run_captures_stdout_and_exit_code() {
        let runner = ProcessRunner::new();
        let outcome = runner
            .run(&argv(&["echo", "hello"]), &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.stdout.trim(), "hello");
        assert!(outcome.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_run_captures_nonzero_exit() {
        let runner = ProcessRunner::new();
        let outcome = runner
            .run(&argv(&["sh", "-c", "exit 3"]), &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.exit_code, Some(3));
    }

    #[tokio::test]
    async fn test_run_times_out_and_kills_child() {
        let runner = ProcessRunner::new();
        let options = RunOptions {
            timeout: Some(0.2),
            ..Default::default()
        };
        let result = runner.run(&argv(&["sleep", "30"]), &options).await;
        match result {
            Err(ProcessError::Timeout { timeout_secs }) => assert_eq!(timeout_secs, 0.2),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_missing_executable() {
        let runner = ProcessRunner::new();
        let result = runner
            .run(
                &argv(&["/nonexistent/pixcache-tool"]),
                &RunOptions::default(),
            )
            .await;
        assert!(matches!(
            result,
            Err(ProcessError::ExecutableNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_empty_command() {
        let runner = ProcessRunner::new();
        let result = runner.run(&[], &RunOptions::default()).await;
        assert!(matches!(result, Err(ProcessError::EmptyCommand)));
    }

    #[tokio::test]
    async fn test_environment_replacement() {
        let runner = ProcessRunner::new();
        let mut env = std::collections::HashMap::new();
        env.insert("PIXCACHE_MARKER".to_string(), "set".to_string());
        let options = RunOptions {
            environment_variables: Some(env),
            ..Default::default()
        };
        // Absolute path: with a cleared environment there is no PATH
        // to resolve a bare "sh" against.
        let outcome = runner
            .run(
                &argv(&["/bin/sh", "-c", "echo ${PIXCACHE_MARKER}-${HOME:-cleared}"]),
                &options,
            )
            .await
            .unwrap();
        // The configured variable is present and the inherited
        // environment is gone.
        assert_eq!(outcome.stdout.trim(), "set-cleared");
    }

    #[tokio::test]
    async fn test_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessRunner::new();
        let options = RunOptions {
            working_directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let outcome = runner.run(&argv(&["pwd"]), &options).await.unwrap();
        let reported = std::fs::canonicalize(outcome.stdout.trim()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
