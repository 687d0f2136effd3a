//! Reading and writing the project configuration file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ris_plugins::Configuration;

use crate::AppError;

/// The project configuration document stored at the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProjectFile {
    path: PathBuf,
}

impl ProjectFile {
    pub(crate) fn new(project_path: &Path, file_name: &str) -> Self {
        Self {
            path: project_path.join(file_name),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read(&self) -> Result<Configuration, AppError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                AppError::MissingProjectConfiguration {
                    path: self.path.clone(),
                }
            } else {
                AppError::ReadFile {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&contents).map_err(|source| AppError::ParseFile {
            path: self.path.clone(),
            source,
        })
    }

    pub(crate) fn write(&self, configuration: &Configuration) -> Result<(), AppError> {
        let data =
            serde_json::to_string_pretty(configuration).map_err(AppError::SerialiseConfiguration)?;
        std::fs::write(&self.path, data).map_err(|source| AppError::WriteFile {
            path: self.path.clone(),
            source,
        })
    }
}
