//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the resolver expects from the host.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `tokio::process` or filesystem types in any signature
//! - Environment access, PATH search and process spawning are separate seams
//! - Implementations live in `nodebin-runtime`; tests use in-memory doubles

pub mod env;
pub mod path_searcher;
pub mod process_runner;

use thiserror::Error;

pub use env::{EnvProvider, EnvVars, SystemEnv};
pub use path_searcher::PathSearcher;
pub use process_runner::{ProcessOutput, ProcessRunner};

#[cfg(test)]
pub use process_runner::MockProcessRunner;

/// Domain-specific errors for process runner operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The binary could not be started (missing, not executable, permission denied).
    #[error("Failed to start: {0}")]
    SpawnFailed(String),

    /// The process started but exited unsuccessfully.
    #[error("Exited with status {}: {stderr}", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    NonZeroExit {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}
