//! Creation of a new host project with an initial set of plugins.
//!
//! [`ProjectBootstrap`] drives the whole sequence: it refuses to reuse an
//! existing directory, scaffolds the project through a [`ProjectGenerator`],
//! initialises and commits the repository, installs plugins as subtrees,
//! runs the package manager and commits the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::configuration::{Configuration, InstallMode};
use crate::context::TaskContext;
use crate::error::PluginError;
use crate::git::GitPrimitives;
use crate::install::{InstallOutcome, InstallTask};
use crate::package_manager::PackageManager;
use crate::plan::DependencyPlanner;

/// Tracing target for project creation.
const PROJECT_TARGET: &str = "ris_plugins::project";

/// Message of the commit holding the scaffolded project.
#[must_use]
pub fn create_commit_message(name: &str) -> String {
    format!("Create project '{name}'")
}

/// Message of the commit holding installed plugins and dependencies.
pub const BOOTSTRAP_COMMIT_MESSAGE: &str = "Bootstrap deps and install plugins";

/// Writes the files of a new project.
pub trait ProjectGenerator {
    /// Scaffolds the project named `name` inside the existing, empty
    /// `project_path`.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] when a file cannot be written.
    fn generate(&self, project_path: &Path, name: &str) -> Result<(), PluginError>;

    /// Persists the project configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginError`] when the configuration cannot be written.
    fn write_configuration(
        &self,
        project_path: &Path,
        configuration: &Configuration,
    ) -> Result<(), PluginError>;
}

/// Fails when `project_path` already exists.
///
/// # Errors
///
/// Returns [`PluginError::ProjectAlreadyExists`] naming `name`.
pub fn ensure_project_absent(name: &str, project_path: &Path) -> Result<(), PluginError> {
    if project_path.exists() {
        return Err(PluginError::ProjectAlreadyExists {
            name: name.to_owned(),
            path: project_path.to_path_buf(),
        });
    }
    Ok(())
}

/// A project created by [`ProjectBootstrap::create`].
#[derive(Debug)]
pub struct CreatedProject {
    /// Run state after all installations.
    pub context: TaskContext,
    /// Outcome of every install task in execution order.
    pub outcomes: Vec<InstallOutcome>,
}

/// Collaborators needed to create a project.
pub struct ProjectBootstrap<'a, G: ?Sized, P: ?Sized, M: ?Sized> {
    generator: &'a P,
    git: &'a G,
    package_manager: &'a M,
    planner: &'a DependencyPlanner,
}

impl<'a, G, P, M> ProjectBootstrap<'a, G, P, M>
where
    G: GitPrimitives + ?Sized,
    P: ProjectGenerator + ?Sized,
    M: PackageManager + ?Sized,
{
    /// Bundles the collaborators of project creation.
    #[must_use]
    pub const fn new(
        generator: &'a P,
        git: &'a G,
        package_manager: &'a M,
        planner: &'a DependencyPlanner,
    ) -> Self {
        Self {
            generator,
            git,
            package_manager,
            planner,
        }
    }

    /// Creates the project `name` under `parent_dir` and installs `plugins`.
    ///
    /// Plugins are always merged as subtrees. A failure stops the sequence
    /// and leaves whatever was created in place.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::ProjectAlreadyExists`] before any side effect
    /// when the directory exists, otherwise the first failing step's error.
    pub fn create(
        &self,
        parent_dir: &Path,
        name: &str,
        plugins: Vec<InstallTask>,
    ) -> Result<CreatedProject, PluginError> {
        let project_path: PathBuf = parent_dir.join(name);
        ensure_project_absent(name, &project_path)?;

        std::fs::create_dir_all(&project_path).map_err(|source| PluginError::Io {
            path: project_path.clone(),
            source: Arc::new(source),
        })?;
        info!(target: PROJECT_TARGET, project = %name, path = %project_path.display(), "creating project");

        self.generator.generate(&project_path, name)?;
        self.git.init(&project_path)?;
        self.git
            .commit(&project_path, &create_commit_message(name))?;

        let mut context = TaskContext::new(project_path.clone(), Configuration::default())
            .with_mode(InstallMode::Production);
        let outcomes = self
            .planner
            .install_with_dependencies(plugins, &mut context, self.git)?;

        self.generator
            .write_configuration(&project_path, context.configuration())?;
        self.package_manager.install(&project_path)?;
        self.git.commit(&project_path, BOOTSTRAP_COMMIT_MESSAGE)?;

        info!(
            target: PROJECT_TARGET,
            project = %name,
            plugins = context.installed_plugins().len(),
            "project created"
        );
        Ok(CreatedProject { context, outcomes })
    }
}
