// Subprocess runner implementation
// reason: async-trait, tokio for async process management
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{info, warn};

use execd_core::domain::CapturedOutput;
use execd_core::port::{ProcessRunner, RunError};

/// Subprocess runner
///
/// Spawns the configured executable with no arguments and no stdin, and
/// collects stdout and stderr independently until the child exits. There
/// is no timeout: a hung child stalls only its own invocation.
pub struct SubprocessRunner {
    command: PathBuf,
}

impl SubprocessRunner {
    /// Create a runner for a fixed executable path.
    ///
    /// The path is immutable configuration; every `run` invokes the same
    /// executable.
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn map_spawn_error(&self, err: std::io::Error) -> RunError {
        let command = self.command.display().to_string();
        if err.kind() == std::io::ErrorKind::NotFound {
            RunError::NotFound { command }
        } else {
            RunError::Spawn {
                command,
                reason: err.to_string(),
            }
        }
    }

    /// Spawn the child and wait for both streams to drain
    async fn spawn_and_wait(&self) -> Result<std::process::Output, RunError> {
        let child = Command::new(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.map_spawn_error(e))?;

        // wait_with_output consumes the child: handles and pipes are
        // released on every path before this returns
        child.wait_with_output().await.map_err(|e| RunError::Io {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ProcessRunner for SubprocessRunner {
    async fn run(&self) -> Result<CapturedOutput, RunError> {
        let start = Instant::now();

        info!(command = %self.command.display(), "Starting subprocess execution");

        let output = match self.spawn_and_wait().await {
            Ok(output) => output,
            Err(e) => {
                warn!(
                    command = %self.command.display(),
                    error = %e,
                    "Subprocess execution failed"
                );
                return Err(e);
            }
        };

        // Exit status is inspected for logging only; a non-zero exit still
        // returns the captured streams normally
        info!(
            command = %self.command.display(),
            duration_ms = %start.elapsed().as_millis(),
            exit_code = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Subprocess execution completed"
        );

        Ok(CapturedOutput::new(output.stdout, output.stderr))
    }
}
