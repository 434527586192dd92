//! Process invocation with a wall-clock deadline.
//!
//! # Responsibilities
//! - Spawn exactly one external process per call
//! - Capture stdout and stderr in full
//! - Kill the process when its deadline expires
//!
//! # Design Decisions
//! - Never returns an error: every outcome is a `RawOutcome` variant
//! - stdin is closed so the CLI can never block on a prompt
//! - `kill_on_drop` ties the child's lifetime to the wait future, so the
//!   timeout path releases the process and its pipes unconditionally

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;

/// What happened when a process was run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutcome {
    /// The process ran to completion.
    Exited {
        code: i32,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },
    /// The deadline expired and the process was killed.
    TimedOut,
    /// The process could not be started at all.
    FailedToStart { cause: String },
}

impl RawOutcome {
    /// Convenience constructor for a clean exit with the given stdout.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self::Exited {
            code: 0,
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Convenience constructor for a non-zero exit with the given stderr.
    pub fn failure(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self::Exited {
            code,
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs an external executable.
#[async_trait]
pub trait ProcessInvoker: Send + Sync {
    async fn invoke(&self, executable: &Path, argv: &[String], timeout: Duration) -> RawOutcome;
}

/// Invoker backed by real OS processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInvoker;

#[async_trait]
impl ProcessInvoker for SystemInvoker {
    async fn invoke(&self, executable: &Path, argv: &[String], timeout: Duration) -> RawOutcome {
        let start = Instant::now();

        let child = Command::new(executable)
            .args(argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(
                    executable = %executable.display(),
                    error = %e,
                    "Failed to spawn process"
                );
                return RawOutcome::FailedToStart {
                    cause: format!("failed to run {}: {}", executable.display(), e),
                };
            }
        };

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let code = output.status.code().unwrap_or(-1);
                tracing::trace!(
                    executable = %executable.display(),
                    exit_code = code,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Process exited"
                );
                RawOutcome::Exited {
                    code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
            Ok(Err(e)) => RawOutcome::FailedToStart {
                cause: format!("failed to wait for {}: {}", executable.display(), e),
            },
            Err(_) => {
                tracing::warn!(
                    executable = %executable.display(),
                    timeout_ms = timeout.as_millis() as u64,
                    "Process timed out, killed"
                );
                RawOutcome::TimedOut
            }
        }
    }
}
