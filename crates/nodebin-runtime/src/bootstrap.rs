//! Composition root wiring the resolver to the OS adapters.

use crate::process::TokioProcessRunner;
use crate::search::SystemPathSearcher;
use nodebin_core::services::BinaryResolver;
use nodebin_core::settings::{ResolverSettings, SettingsError, validate_settings};
use std::sync::Arc;

/// Build a [`BinaryResolver`] backed by the real filesystem and processes.
pub fn system_resolver(settings: &ResolverSettings) -> Result<BinaryResolver, SettingsError> {
    validate_settings(settings)?;

    Ok(BinaryResolver::with_settings(
        Arc::new(SystemPathSearcher::new(settings)),
        Arc::new(TokioProcessRunner),
        settings,
    ))
}
