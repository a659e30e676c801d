//! PATH-based executable search.

use super::fs::{FsProvider, SystemFs};
use super::types::{Attempt, AttemptOutcome, SearchReport};
use nodebin_core::ports::{EnvProvider, PathSearcher, SystemEnv};
use nodebin_core::settings::ResolverSettings;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Searches a PATH-like list, then any configured extra directories.
pub struct SystemPathSearcher {
    fs: Box<dyn FsProvider>,
    extra_search_paths: Vec<String>,
    #[cfg_attr(not(windows), allow(dead_code))]
    pathext: Option<OsString>,
}

impl SystemPathSearcher {
    /// Searcher over the real filesystem, reading PATHEXT from the process.
    pub fn new(settings: &ResolverSettings) -> Self {
        Self::with_deps(settings, &SystemEnv, Box::new(SystemFs))
    }

    /// Searcher with injected dependencies (for testing).
    pub fn with_deps(
        settings: &ResolverSettings,
        env: &dyn EnvProvider,
        fs: Box<dyn FsProvider>,
    ) -> Self {
        Self {
            fs,
            extra_search_paths: settings.extra_search_paths.clone(),
            pathext: env.get("PATHEXT"),
        }
    }

    /// Search for `command`, recording every candidate that was checked.
    pub fn search(&self, command: &str, search_path: Option<&OsStr>) -> SearchReport {
        let mut report = SearchReport::default();
        if command.is_empty() {
            return report;
        }

        let path_dirs = search_path
            .map(|p| std::env::split_paths(p).collect::<Vec<_>>())
            .unwrap_or_default();
        let extra_dirs = self.extra_search_paths.iter().map(PathBuf::from);

        for dir in path_dirs.into_iter().chain(extra_dirs) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            // Relative entries (`.`, `bin`) resolve against the current directory.
            let dir = match std::path::absolute(&dir) {
                Ok(dir) => dir,
                Err(e) => {
                    debug!("Skipping search path entry {}: {}", dir.display(), e);
                    continue;
                }
            };
            if self.search_dir(&dir, command, &mut report.attempts) {
                report.resolved = report.attempts.last().map(|a| a.candidate.clone());
                return report;
            }
        }

        report
    }

    /// Check every candidate name in `dir`. Returns true on the first success.
    fn search_dir(&self, dir: &Path, command: &str, attempts: &mut Vec<Attempt>) -> bool {
        for name in self.candidate_names(command) {
            let candidate = dir.join(name);
            let outcome = self.fs.check_executable(&candidate);
            let found = outcome == AttemptOutcome::Ok;
            attempts.push(Attempt { candidate, outcome });
            if found {
                return true;
            }
        }
        false
    }

    #[cfg(windows)]
    fn candidate_names(&self, command: &str) -> Vec<String> {
        pathext_variants(command, self.pathext.as_deref())
    }

    #[cfg(not(windows))]
    fn candidate_names(&self, command: &str) -> Vec<String> {
        let _ = self;
        vec![command.to_string()]
    }
}

/// Get PATHEXT variants for Windows (e.g., node -> [node.com, node.exe, ...]).
///
/// An extensionless name is only tried with an extension appended, so an
/// npm-style `node` shell script never shadows `node.exe` in the same
/// directory. A name that already carries an extension is tried as-is first.
#[cfg_attr(not(windows), allow(dead_code))]
fn pathext_variants(command: &str, pathext: Option<&OsStr>) -> Vec<String> {
    let mut variants = Vec::new();
    if Path::new(command).extension().is_some() {
        variants.push(command.to_string());
    }

    if let Some(pathext_str) = pathext.and_then(OsStr::to_str) {
        for ext in pathext_str.split(';') {
            if !ext.is_empty() {
                variants.push(format!("{command}{}", ext.to_lowercase()));
            }
        }
    } else {
        // Default Windows executable extensions if PATHEXT not set
        for ext in [".cmd", ".exe", ".bat", ".com"] {
            variants.push(format!("{command}{ext}"));
        }
    }

    variants
}

impl PathSearcher for SystemPathSearcher {
    fn find(&self, name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
        let report = self.search(name, search_path);
        if report.resolved.is_none() {
            debug!(
                "Could not find '{}' on the search path. Tried:\n{}",
                name,
                report.describe_attempts()
            );
        }
        report.resolved
    }
}
