//! External process execution
//!
//! Every probe reaches the outside world through the [`CommandRunner`]
//! capability, so tests can substitute a [`FakeRunner`] without touching
//! real system utilities.

pub mod fake;

pub use fake::FakeRunner;

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Result of one external command invocation.
///
/// A failed invocation (non-zero exit, missing binary, timeout) is not
/// an `Err`: it is captured as a present `error` with whatever stdout
/// and stderr could be extracted. Retry policy, if any, belongs to the
/// probe layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// Invocation error, if the command did not complete successfully
    pub error: Option<String>,
}

impl CommandOutput {
    /// Output of a successful invocation
    pub fn ok<S: Into<String>, T: Into<String>>(stdout: S, stderr: T) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            error: None,
        }
    }

    /// Output of a failed invocation with best-effort captured streams
    pub fn failed<S: Into<String>, T: Into<String>, E: Into<String>>(
        stdout: S,
        stderr: T,
        error: E,
    ) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            error: Some(error.into()),
        }
    }

    /// True when the invocation completed without error
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Capability interface for running external diagnostic commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion, bounded by `limit`.
    ///
    /// Never returns an `Err`-like shape: all failure modes end up in
    /// [`CommandOutput::error`].
    async fn run(&self, program: &str, args: &[&str], limit: Duration) -> CommandOutput;
}

/// Production runner backed by `tokio::process`.
#[derive(Debug, Default, Clone)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], limit: Duration) -> CommandOutput {
        let invocation = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output();

        match timeout(limit, invocation).await {
            Err(_) => CommandOutput::failed(
                "",
                "",
                format!("{} timed out after {}s", program, limit.as_secs()),
            ),
            Ok(Err(e)) => {
                // Spawn failure, typically a missing binary
                CommandOutput::failed("", "", format!("failed to run {}: {}", program, e))
            }
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

                if output.status.success() {
                    CommandOutput::ok(stdout, stderr)
                } else {
                    let code = output
                        .status
                        .code()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "signal".to_string());
                    CommandOutput::failed(
                        stdout,
                        stderr,
                        format!("{} exited with code {}", program, code),
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_invocation_captures_stdout() {
        let runner = SystemRunner::new();
        let output = runner
            .run("echo", &["hello"], Duration::from_secs(5))
            .await;

        assert!(output.succeeded());
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.error.is_none());
    }

    #[tokio::test]
    async fn test_missing_binary_becomes_error_outcome() {
        let runner = SystemRunner::new();
        let output = runner
            .run(
                "netpulse-no-such-binary-2a7f",
                &[],
                Duration::from_secs(5),
            )
            .await;

        assert!(!output.succeeded());
        let error = output.error.expect("spawn failure must be captured");
        assert!(error.contains("failed to run"));
        assert!(output.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_keeps_streams() {
        let runner = SystemRunner::new();
        let output = runner
            .run("sh", &["-c", "echo partial; exit 2"], Duration::from_secs(5))
            .await;

        assert!(!output.succeeded());
        assert_eq!(output.stdout.trim(), "partial");
        assert!(output.error.unwrap().contains("exited with code 2"));
    }

    #[tokio::test]
    async fn test_timeout_produces_error_outcome() {
        let runner = SystemRunner::new();
        let output = runner
            .run("sleep", &["5"], Duration::from_millis(50))
            .await;

        assert!(!output.succeeded());
        assert!(output.error.unwrap().contains("timed out"));
    }
}
