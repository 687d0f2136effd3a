//! Filesystem collaborators used by `ris new`.

use std::path::Path;

use ris_plugins::{
    Configuration, PackageManager, PackageManifest, PluginError, ProcessPackageManager,
    ProjectGenerator, select_program,
};
use serde_json::json;
use tracing::debug;

use crate::project_file::ProjectFile;

const GENERATOR_TARGET: &str = "ris_cli::bootstrap";

const GITIGNORE: &str = "node_modules\n";

/// Scaffolds a minimal project: `package.json`, `.gitignore` and the project
/// configuration file.
#[derive(Debug, Clone)]
pub(crate) struct FileProjectGenerator {
    configuration_file: String,
}

impl FileProjectGenerator {
    pub(crate) fn new(configuration_file: impl Into<String>) -> Self {
        Self {
            configuration_file: configuration_file.into(),
        }
    }
}

impl ProjectGenerator for FileProjectGenerator {
    fn generate(&self, project_path: &Path, name: &str) -> Result<(), PluginError> {
        debug!(target: GENERATOR_TARGET, project = %name, "writing project skeleton");
        PackageManifest::from_value(json!({
            "name": name,
            "version": "0.1.0",
            "private": true,
        }))
        .save(project_path)?;

        let gitignore = project_path.join(".gitignore");
        std::fs::write(&gitignore, GITIGNORE).map_err(|source| PluginError::Io {
            path: gitignore,
            source: source.into(),
        })?;

        self.write_configuration(project_path, &Configuration::default())
    }

    fn write_configuration(
        &self,
        project_path: &Path,
        configuration: &Configuration,
    ) -> Result<(), PluginError> {
        let file = ProjectFile::new(project_path, &self.configuration_file);
        file.write(configuration)
            .map_err(|error| error.into_plugin_error(file.path().to_path_buf()))
    }
}

/// Picks `npm` or `yarn` once the project exists, then runs it.
#[derive(Debug, Clone)]
pub(crate) struct SelectedPackageManager {
    prefer_yarn: bool,
    default_program: &'static str,
}

impl SelectedPackageManager {
    pub(crate) const fn new(prefer_yarn: bool, default_program: &'static str) -> Self {
        Self {
            prefer_yarn,
            default_program,
        }
    }
}

impl PackageManager for SelectedPackageManager {
    fn install(&self, project_path: &Path) -> Result<(), PluginError> {
        let program = select_program(project_path, self.prefer_yarn, self.default_program);
        ProcessPackageManager::new(program).install(project_path)
    }
}
