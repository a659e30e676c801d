//! Environment provider trait for testable path resolution.

use std::collections::HashMap;
use std::ffi::OsString;

/// Trait for accessing environment variables (injectable for testing).
pub trait EnvProvider: Send + Sync {
    /// Get an environment variable.
    fn get(&self, key: &str) -> Option<OsString>;
}

/// Production environment provider that reads from the actual process environment.
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn get(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// An owned environment snapshot, typically the `env` block of a launch
/// configuration merged over the process environment.
///
/// Keys are case-insensitive on Windows (`Path` and `PATH` are the same
/// variable) and case-sensitive elsewhere.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, OsString>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    pub fn from_system() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| k.into_string().ok().map(|k| (k, v)))
            .collect()
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OsString>) {
        self.vars.insert(normalize_key(key.into()), value.into());
    }
}

impl<K: Into<String>, V: Into<OsString>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (k, v) in iter {
            env.insert(k, v);
        }
        env
    }
}

impl EnvProvider for EnvVars {
    fn get(&self, key: &str) -> Option<OsString> {
        self.vars.get(&normalize_key(key.to_string())).cloned()
    }
}

#[cfg(windows)]
fn normalize_key(key: String) -> String {
    key.to_uppercase()
}

#[cfg(not(windows))]
fn normalize_key(key: String) -> String {
    key
}
