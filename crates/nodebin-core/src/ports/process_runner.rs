//! Process runner trait definition.
//!
//! This port runs a short-lived process to completion and captures its
//! output. It is used to probe binaries (e.g. `node --version`), not to
//! manage long-running servers.

use async_trait::async_trait;
use std::path::Path;

use super::ProcessError;

/// Captured result of a process that ran to a successful exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output, decoded lossily as UTF-8.
    pub stdout: String,
    /// Exit code, if the platform reported one.
    pub status: Option<i32>,
}

impl ProcessOutput {
    /// Output of a process that exited with status 0.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            status: Some(0),
        }
    }
}

/// Process runner for one-shot probe invocations.
///
/// Implementations must distinguish a binary that could not be started at
/// all ([`ProcessError::SpawnFailed`]) from one that started and exited
/// unsuccessfully ([`ProcessError::NonZeroExit`]). No timeout is applied;
/// callers that need one wrap the returned future.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to exit.
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, ProcessError>;
}
