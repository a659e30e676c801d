//! Classified failures of a resolution call.

use crate::version::MIN_SUPPORTED_MAJOR;
use std::path::PathBuf;
use thiserror::Error;

/// Why a Node.js binary could not be used for debugging.
///
/// Both variants are terminal from the resolver's point of view. Callers
/// are expected to surface the message as-is and let the user fix their
/// setup before trying again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Nothing usable was found, or the located binary could not be run.
    #[error(
        "Can't find Node.js binary \"{name}\". Make sure Node.js is installed and in your PATH, or set the \"runtimeExecutable\" in your launch configuration."
    )]
    BinaryNotFound {
        /// The requested executable name, or the path that failed to run.
        name: String,
    },

    /// The binary ran but reported an unsupported or unrecognisable version.
    #[error(
        "Debugging with Node.js requires version {min} or higher, but {} reported \"{version}\"",
        .path.display(),
        min = MIN_SUPPORTED_MAJOR
    )]
    BinaryOutOfDate {
        /// Trimmed `--version` output.
        version: String,
        /// Path to the binary that was probed.
        path: PathBuf,
    },
}

/// Discriminant of [`ResolveError`] for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveErrorKind {
    NotFound,
    OutOfDate,
}

impl ResolveError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::BinaryNotFound { name: name.into() }
    }

    /// Build an out-of-date error; surrounding whitespace is stripped from `raw`.
    pub fn out_of_date(raw: &str, path: impl Into<PathBuf>) -> Self {
        Self::BinaryOutOfDate {
            version: raw.trim().to_string(),
            path: path.into(),
        }
    }

    pub const fn kind(&self) -> ResolveErrorKind {
        match self {
            Self::BinaryNotFound { .. } => ResolveErrorKind::NotFound,
            Self::BinaryOutOfDate { .. } => ResolveErrorKind::OutOfDate,
        }
    }

    pub const fn is_out_of_date(&self) -> bool {
        matches!(self, Self::BinaryOutOfDate { .. })
    }
}

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
