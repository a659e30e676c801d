//! The validated Node.js binary handed back to callers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime features whose availability depends on the Node major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `--require` accepts paths containing spaces.
    UseSpacesInRequirePath,
}

impl Capability {
    /// First major version that has this capability.
    pub const fn min_major(self) -> u32 {
        match self {
            Self::UseSpacesInRequirePath => 12,
        }
    }
}

/// A located Node.js executable and what we know about its version.
///
/// `major_version` is `None` when probing was bypassed (explicit version
/// from the caller is the other way to get one) or when a shim was accepted
/// without a verifiable underlying binary. Unknown versions are treated as
/// fully capable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryDescriptor {
    path: PathBuf,
    major_version: Option<u32>,
}

impl BinaryDescriptor {
    /// Create a descriptor for the binary at `path`.
    pub fn new(path: impl Into<PathBuf>, major_version: Option<u32>) -> Self {
        Self {
            path: path.into(),
            major_version,
        }
    }

    /// Absolute path to the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Major version, if it was determined.
    pub const fn major_version(&self) -> Option<u32> {
        self.major_version
    }

    /// Whether the version came from a probe or the caller rather than a guess.
    pub const fn is_precisely_known(&self) -> bool {
        self.major_version.is_some()
    }

    /// Whether the binary supports `capability`. Unknown versions always do.
    pub const fn has(&self, capability: Capability) -> bool {
        match self.major_version {
            Some(major) => major >= capability.min_major(),
            None => true,
        }
    }

    pub const fn supports_spaces_in_require_path(&self) -> bool {
        self.has(Capability::UseSpacesInRequirePath)
    }
}
