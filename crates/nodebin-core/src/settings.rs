//! Resolver settings and validation.
//!
//! These are pure configuration types with no infrastructure dependencies.

use crate::ports::EnvProvider;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default name of the variable holding the executable search path.
pub const DEFAULT_PATH_VARIABLE: &str = "PATH";

/// Environment variable listing extra directories to search after PATH.
pub const EXTRA_PATHS_ENV: &str = "NODEBIN_EXTRA_PATHS";

/// Settings for locating Node.js binaries.
///
/// All fields are optional to support partial configuration files.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverSettings {
    /// Name of the PATH-like variable read from the environment.
    pub path_variable: Option<String>,

    /// Directories searched, in order, after the search path is exhausted.
    pub extra_search_paths: Vec<String>,
}

impl ResolverSettings {
    /// Build settings from `NODEBIN_EXTRA_PATHS` in `env`.
    ///
    /// The variable uses the platform's path-list syntax (`:` or `;`).
    pub fn from_env(env: &dyn EnvProvider) -> Self {
        let extra_search_paths = env
            .get(EXTRA_PATHS_ENV)
            .map(|value| {
                std::env::split_paths(&value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            path_variable: None,
            extra_search_paths,
        }
    }

    /// Get the effective search-path variable name (with default fallback).
    pub fn effective_path_variable(&self) -> &str {
        self.path_variable.as_deref().unwrap_or(DEFAULT_PATH_VARIABLE)
    }
}

/// Errors that can occur during settings validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("pathVariable must not be empty")]
    EmptyPathVariable,

    #[error("extraSearchPaths[{0}] must not be empty")]
    EmptySearchPath(usize),
}

/// Validate resolver settings.
pub fn validate_settings(settings: &ResolverSettings) -> Result<(), SettingsError> {
    if let Some(var) = &settings.path_variable {
        if var.trim().is_empty() {
            return Err(SettingsError::EmptyPathVariable);
        }
    }

    if let Some(index) = settings
        .extra_search_paths
        .iter()
        .position(|p| p.trim().is_empty())
    {
        return Err(SettingsError::EmptySearchPath(index));
    }

    Ok(())
}
