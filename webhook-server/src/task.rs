//! External task execution.
//!
//! The webhook's only job on a qualifying event is to launch the
//! optimization script and wait for it to finish. The runner is behind a
//! trait so the handler can be tested with a double instead of spawning
//! real processes.

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;
use tracing::info;

/// Captured result of a completed task process.
#[derive(Debug, Clone)]
pub struct TaskOutput {
    /// Full captured standard output.
    pub stdout: String,
    /// Full captured standard error.
    pub stderr: String,
    /// Whether the process exited with a zero status. Logged only; the
    /// webhook response does not depend on it.
    pub success: bool,
}

/// The task process could not be started.
///
/// This covers spawn-time failures only (missing interpreter, missing
/// script, permission denied). A script that starts and then exits
/// non-zero is NOT a launch error.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LaunchError {
    message: String,
}

impl LaunchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Synchronous task-execution seam.
///
/// `run` blocks the calling handler until the process terminates and both
/// output streams are fully drained.
#[async_trait]
pub trait TaskRunner: Send + Sync {
    async fn run(&self) -> Result<TaskOutput, LaunchError>;
}

/// Runs the optimization script as a child process.
///
/// Invokes `<command> <script_path>` with no further arguments, piping
/// stdout and stderr. There is deliberately no timeout: a hung script
/// stalls that request's handler until the process exits.
pub struct ScriptRunner {
    command: String,
    script_path: String,
}

impl ScriptRunner {
    pub fn new(command: String, script_path: String) -> Self {
        Self {
            command,
            script_path,
        }
    }
}

#[async_trait]
impl TaskRunner for ScriptRunner {
    async fn run(&self) -> Result<TaskOutput, LaunchError> {
        info!(
            command = %self.command,
            script_path = %self.script_path,
            "script_starting"
        );

        // `output()` waits for exit and drains both pipes in full.
        let output = Command::new(&self.command)
            .arg(&self.script_path)
            .output()
            .await
            .map_err(|e| {
                LaunchError::new(format!(
                    "failed to start {} {}: {}",
                    self.command, self.script_path, e
                ))
            })?;

        Ok(TaskOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}
