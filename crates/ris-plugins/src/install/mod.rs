//! Installation of a single plugin into a host project.
//!
//! [`InstallTask`] installs one plugin idempotently. In development mode the
//! repository is cloned into the plugins directory; in every other mode it is
//! merged into the host repository as a subtree. The task mutates the shared
//! [`TaskContext`] only after the git primitive has succeeded.

use tracing::{debug, info};

use crate::configuration::InstallMode;
use crate::context::{InstalledPlugin, TaskContext};
use crate::error::PluginError;
use crate::finder::PluginSpec;
use crate::git::GitPrimitives;
use crate::paths::{path_to_slash, relative_path};

/// Tracing target for install operations.
const INSTALL_TARGET: &str = "ris_plugins::install";

/// Reason reported for a skipped installation.
pub const ALREADY_INSTALLED: &str = "Plugin already installed";

/// Request to install one plugin.
///
/// # Example
///
/// ```
/// use ris_plugins::{Configuration, InstallMode, InstallTask, TaskContext};
///
/// let mut configuration = Configuration::new("./packages", InstallMode::Development);
/// configuration.record_plugin("rispa-core", "https://git.com/x/rispa-core.git");
/// let context = TaskContext::new("/work/project", configuration);
///
/// let task = InstallTask::new("rispa-core");
/// assert_eq!(task.title(), "Install plugin with name rispa-core");
/// assert_eq!(task.skip_reason(&context), Some("Plugin already installed"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTask {
    name: String,
    clone_url: Option<String>,
    git_ref: Option<String>,
}

/// Result of a task that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The plugin was installed during this run.
    Installed(InstalledPlugin),
    /// The plugin was already listed and nothing was done.
    AlreadyInstalled {
        /// Name of the skipped plugin.
        name: String,
    },
}

impl InstallOutcome {
    /// Returns `true` for a skipped installation.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::AlreadyInstalled { .. })
    }

    /// Name of the plugin the outcome refers to.
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Installed(plugin) => plugin.name(),
            Self::AlreadyInstalled { name } => name.as_str(),
        }
    }
}

impl InstallTask {
    /// Creates a task for `name` without a clone URL or ref.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clone_url: None,
            git_ref: None,
        }
    }

    /// Creates a task from a resolved spec.
    #[must_use]
    pub fn from_spec(spec: &PluginSpec) -> Self {
        Self {
            name: spec.name().to_owned(),
            clone_url: spec.clone_url().map(str::to_owned),
            git_ref: None,
        }
    }

    /// Sets the repository to install from.
    #[must_use]
    pub fn with_clone_url(mut self, clone_url: impl Into<String>) -> Self {
        self.clone_url = Some(clone_url.into());
        self
    }

    /// Sets the ref to check out or merge.
    #[must_use]
    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    /// Plugin name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Repository URL, if resolved.
    #[must_use]
    pub fn clone_url(&self) -> Option<&str> {
        self.clone_url.as_deref()
    }

    /// Requested ref, if any.
    #[must_use]
    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }

    /// Human-readable task title.
    #[must_use]
    pub fn title(&self) -> String {
        format!("Install plugin with name {}", self.name)
    }

    /// Reason to skip the task, or `None` when it must run.
    #[must_use]
    pub fn skip_reason(&self, context: &TaskContext) -> Option<&'static str> {
        context
            .configuration()
            .contains(&self.name)
            .then_some(ALREADY_INSTALLED)
    }

    /// Installs the plugin into the project described by `context`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::UnresolvedPlugin`] without a clone URL and
    /// [`PluginError::InvalidCloneUrl`] when the URL does not end in `.git`,
    /// both before any side effect. Git failures surface as
    /// [`PluginError::CloneFailed`] or [`PluginError::SubtreeFailed`]; the
    /// context is left untouched in every error case.
    pub fn run<G>(&self, context: &mut TaskContext, git: &G) -> Result<InstallOutcome, PluginError>
    where
        G: GitPrimitives + ?Sized,
    {
        if let Some(reason) = self.skip_reason(context) {
            info!(target: INSTALL_TARGET, plugin = %self.name, reason, "skipping plugin");
            return Ok(InstallOutcome::AlreadyInstalled {
                name: self.name.clone(),
            });
        }

        context.installed_plugins_mut();
        let plugins_path = context.resolve_plugins_path();
        let mode = context.resolve_mode();
        let clone_url = self.validated_clone_url()?;
        let plugin_path = plugins_path.join(&self.name);

        match mode {
            InstallMode::Development => {
                debug!(
                    target: INSTALL_TARGET,
                    plugin = %self.name,
                    path = %plugin_path.display(),
                    "cloning plugin"
                );
                git.clone_repository(&plugin_path, clone_url, self.git_ref())
                    .map_err(|source| PluginError::CloneFailed {
                        name: self.name.clone(),
                        url: clone_url.to_owned(),
                        source,
                    })?;
            }
            InstallMode::Production => {
                let prefix = self.subtree_prefix(context, &plugins_path);
                debug!(
                    target: INSTALL_TARGET,
                    plugin = %self.name,
                    %prefix,
                    "adding plugin subtree"
                );
                git.add_subtree(
                    context.project_path(),
                    &prefix,
                    &self.name,
                    clone_url,
                    self.git_ref(),
                )
                .map_err(|source| PluginError::SubtreeFailed {
                    name: self.name.clone(),
                    prefix,
                    source,
                })?;
            }
        }

        let installed = InstalledPlugin::new(
            self.name.clone(),
            plugin_path,
            clone_url,
            self.git_ref.clone(),
        );
        context.remember_plugins_path(plugins_path);
        context.installed_plugins_mut().push(installed.clone());
        context
            .configuration_mut()
            .record_plugin(&self.name, clone_url);

        info!(target: INSTALL_TARGET, plugin = %self.name, %mode, "installed plugin");
        Ok(InstallOutcome::Installed(installed))
    }

    fn validated_clone_url(&self) -> Result<&str, PluginError> {
        let clone_url = self
            .clone_url
            .as_deref()
            .ok_or_else(|| PluginError::UnresolvedPlugin {
                name: self.name.clone(),
            })?;
        if !clone_url.ends_with(".git") {
            return Err(PluginError::InvalidCloneUrl {
                name: self.name.clone(),
                url: clone_url.to_owned(),
            });
        }
        Ok(clone_url)
    }

    fn subtree_prefix(&self, context: &TaskContext, plugins_path: &std::path::Path) -> String {
        let relative = path_to_slash(&relative_path(context.project_path(), plugins_path));
        if relative.is_empty() {
            self.name.clone()
        } else {
            format!("{relative}/{}", self.name)
        }
    }
}

/// Runs `tasks` in order against one shared context.
///
/// The first failure aborts the sequence; plugins installed before it stay
/// installed and recorded in the context.
///
/// # Errors
///
/// Returns the error of the first failing task.
pub fn install_plugins<G>(
    tasks: &[InstallTask],
    context: &mut TaskContext,
    git: &G,
) -> Result<Vec<InstallOutcome>, PluginError>
where
    G: GitPrimitives + ?Sized,
{
    tasks.iter().map(|task| task.run(context, git)).collect()
}

#[cfg(test)]
mod tests;
