//! Known plugin candidates loaded from the configured registry file.

use std::path::PathBuf;

use ris_config::Config;
use ris_plugins::PluginSpec;

use crate::AppError;

/// Loads the candidate list bare plugin names resolve against.
///
/// Without a configured registry the list is empty, so only `git+` URLs
/// resolve.
pub(crate) fn load_candidates(config: &Config) -> Result<Vec<PluginSpec>, AppError> {
    let Some(location) = config.plugin_registry() else {
        return Ok(Vec::new());
    };
    let path = PathBuf::from(location);
    let contents = std::fs::read_to_string(&path).map_err(|source| AppError::ReadFile {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| AppError::ParseFile { path, source })
}
