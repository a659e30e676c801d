//! `tokio::process` implementation of the process runner port.

use async_trait::async_trait;
use nodebin_core::ports::{ProcessError, ProcessOutput, ProcessRunner};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Runs probe commands as child processes.
///
/// The child is killed if the returned future is dropped, so callers can
/// bound a probe with `tokio::time::timeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, ProcessError> {
        debug!("Running {} {}", program.display(), args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ProcessError::SpawnFailed(format!("{}: {e}", program.display())))?;

        if !output.status.success() {
            return Err(ProcessError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            status: output.status.code(),
        })
    }
}
