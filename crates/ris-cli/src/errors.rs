//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use ris_plugins::{CacheError, PluginError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to determine the current directory: {0}")]
    CurrentDirectory(io::Error),
    #[error("can't find project configuration '{}', is this a ris project?", path.display())]
    MissingProjectConfiguration { path: PathBuf },
    #[error("failed to read '{}': {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse '{}': {source}", path.display())]
    ParseFile {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialise project configuration: {0}")]
    SerialiseConfiguration(serde_json::Error),
    #[error("failed to write '{}': {source}", path.display())]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("failed to write command output: {0}")]
    Output(io::Error),
    #[error(transparent)]
    Plugin(#[from] PluginError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl AppError {
    /// Wraps the error for the [`ris_plugins::ProjectGenerator`] seam.
    pub(crate) fn into_plugin_error(self, path: PathBuf) -> PluginError {
        match self {
            Self::Plugin(error) => error,
            other => PluginError::Manifest {
                path,
                message: other.to_string(),
            },
        }
    }
}
