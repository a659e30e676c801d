//! Executable search over PATH-like variables.
//!
//! ## Architecture
//!
//! The searcher is split into small, focused modules:
//! - `types`: Diagnostic types (`SearchReport`, `Attempt`, `AttemptOutcome`)
//! - `fs`: Filesystem operations trait (injectable for testing)
//! - `searcher`: `SystemPathSearcher`, the `PathSearcher` port implementation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nodebin_core::settings::ResolverSettings;
//! use nodebin_runtime::search::SystemPathSearcher;
//!
//! let searcher = SystemPathSearcher::new(&ResolverSettings::default());
//! let path = std::env::var_os("PATH");
//! let report = searcher.search("node", path.as_deref());
//! for attempt in &report.attempts {
//!     println!("  {} - {}", attempt.candidate.display(), attempt.outcome);
//! }
//! ```

mod fs;
mod searcher;
mod types;

pub use fs::{FsProvider, SystemFs};
pub use searcher::SystemPathSearcher;
pub use types::{Attempt, AttemptOutcome, SearchReport};

#[cfg(test)]
pub use fs::MockFs;
