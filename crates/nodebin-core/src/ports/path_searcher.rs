//! Path searcher port.
//!
//! Resolves an executable name to an absolute path using a PATH-like list
//! of directories. Implementations apply the host's executable-extension
//! conventions (PATHEXT on Windows).

use std::ffi::OsStr;
use std::path::PathBuf;

/// Port for locating executables on a search path.
pub trait PathSearcher: Send + Sync {
    /// Find `name` in `search_path`, returning the first executable match.
    ///
    /// `search_path` is the raw value of the PATH-like variable, or `None`
    /// when the environment does not define one.
    fn find(&self, name: &str, search_path: Option<&OsStr>) -> Option<PathBuf>;
}
