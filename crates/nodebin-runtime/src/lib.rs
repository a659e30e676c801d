//! OS-backed adapters for the `nodebin-core` ports.
//!
//! - [`search::SystemPathSearcher`] walks PATH-like variables
//! - [`process::TokioProcessRunner`] runs `--version` probes
//! - [`system_resolver`] wires both into a `BinaryResolver`

pub mod bootstrap;
pub mod process;
pub mod search;

pub use bootstrap::system_resolver;
pub use process::TokioProcessRunner;
pub use search::{Attempt, AttemptOutcome, FsProvider, SearchReport, SystemFs, SystemPathSearcher};
