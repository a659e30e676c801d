//! Types for executable search diagnostics.

use std::path::PathBuf;

/// Everything the searcher looked at while resolving one name.
#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    /// The first candidate that passed the executable check, if any.
    pub resolved: Option<PathBuf>,
    /// All locations that were checked, in order.
    pub attempts: Vec<Attempt>,
}

impl SearchReport {
    /// Render the attempts as an indented list, one candidate per line.
    pub fn describe_attempts(&self) -> String {
        if self.attempts.is_empty() {
            return "  (no candidates checked)".to_string();
        }

        self.attempts
            .iter()
            .map(|a| {
                let mark = if a.outcome == AttemptOutcome::Ok { '✓' } else { '✗' };
                format!("  {mark} {}: {}", a.candidate.display(), a.outcome)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single attempt to locate an executable at a candidate path.
#[derive(Debug, Clone)]
pub struct Attempt {
    /// The path that was checked.
    pub candidate: PathBuf,
    /// The outcome of checking this candidate.
    pub outcome: AttemptOutcome,
}

/// Possible outcomes when checking if a candidate path is a valid executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// File was found and is executable (success case).
    Ok,
    /// Path does not exist.
    NotFound,
    /// Path exists but is not a file (e.g., directory).
    NotAFile,
    /// File exists but is not marked executable.
    NotExecutable,
    /// Permission denied when checking the path.
    PermissionDenied,
    /// Other I/O error occurred.
    IoError(String),
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NotFound => write!(f, "not found"),
            Self::NotAFile => write!(f, "not a file"),
            Self::NotExecutable => write!(f, "not executable"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}
