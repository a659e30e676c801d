//! Locate and validate a debuggable Node.js runtime.
//!
//! The core crate holds the domain types, the collaborator ports and the
//! [`BinaryResolver`] service. OS-backed implementations of the ports live
//! in `nodebin-runtime`.

pub mod descriptor;
pub mod error;
pub mod ports;
pub mod services;
pub mod settings;
pub mod version;

// Re-export commonly used types for convenience
pub use descriptor::{BinaryDescriptor, Capability};
pub use error::{ResolveError, ResolveErrorKind, ResolveResult};
pub use ports::{
    EnvProvider, EnvVars, PathSearcher, ProcessError, ProcessOutput, ProcessRunner, SystemEnv,
};
pub use services::BinaryResolver;
pub use settings::{
    DEFAULT_PATH_VARIABLE, EXTRA_PATHS_ENV, ResolverSettings, SettingsError, validate_settings,
};
pub use version::{
    CANONICAL_BINARY_NAME, MIN_SUPPORTED_MAJOR, is_canonical_binary_name, parse_major_version,
};
