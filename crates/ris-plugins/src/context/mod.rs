//! Run-scoped state shared by a sequence of install tasks.
//!
//! One [`TaskContext`] is created per run and handed by mutable reference to
//! each task in turn. It owns the project [`Configuration`] being updated,
//! optional overrides of the install mode and plugins directory, and the
//! history of plugins installed during the run.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::configuration::{Configuration, InstallMode};
use crate::paths::normalize;

/// A plugin installed during the current run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPlugin {
    name: String,
    path: PathBuf,
    clone_url: String,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    git_ref: Option<String>,
}

impl InstalledPlugin {
    /// Records a completed installation.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        clone_url: impl Into<String>,
        git_ref: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            clone_url: clone_url.into(),
            git_ref,
        }
    }

    /// Plugin name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Directory the plugin now lives in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Repository the plugin was installed from.
    #[must_use]
    pub const fn clone_url(&self) -> &str {
        self.clone_url.as_str()
    }

    /// Ref requested for the installation, if any.
    #[must_use]
    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }
}

/// Mutable state shared across the install tasks of one run.
#[derive(Debug, Clone)]
pub struct TaskContext {
    project_path: PathBuf,
    configuration: Configuration,
    mode: Option<InstallMode>,
    plugins_path: Option<PathBuf>,
    installed_plugins: Option<Vec<InstalledPlugin>>,
}

impl TaskContext {
    /// Creates a context for the project at `project_path`.
    #[must_use]
    pub fn new(project_path: impl Into<PathBuf>, configuration: Configuration) -> Self {
        Self {
            project_path: project_path.into(),
            configuration,
            mode: None,
            plugins_path: None,
            installed_plugins: None,
        }
    }

    /// Forces an install mode regardless of the configuration.
    #[must_use]
    pub const fn with_mode(mut self, mode: InstallMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Forces an absolute plugins directory regardless of the configuration.
    #[must_use]
    pub fn with_plugins_path(mut self, plugins_path: impl Into<PathBuf>) -> Self {
        self.plugins_path = Some(plugins_path.into());
        self
    }

    /// Root of the host project.
    #[must_use]
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Project configuration as updated so far.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Mutable access to the project configuration.
    pub const fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    /// Consumes the context, returning the updated configuration.
    #[must_use]
    pub fn into_configuration(self) -> Configuration {
        self.configuration
    }

    /// Plugins installed during this run, oldest first.
    #[must_use]
    pub fn installed_plugins(&self) -> &[InstalledPlugin] {
        self.installed_plugins.as_deref().unwrap_or_default()
    }

    /// Install mode: the override if set, else the configured mode.
    #[must_use]
    pub fn resolve_mode(&self) -> InstallMode {
        self.mode.unwrap_or_else(|| self.configuration.mode())
    }

    /// Absolute plugins directory: the override if set, else the configured
    /// relative path joined onto the project root.
    #[must_use]
    pub fn resolve_plugins_path(&self) -> PathBuf {
        self.plugins_path.clone().unwrap_or_else(|| {
            normalize(&self.project_path.join(self.configuration.plugins_path()))
        })
    }

    pub(crate) fn remember_plugins_path(&mut self, plugins_path: PathBuf) {
        self.plugins_path = Some(plugins_path);
    }

    pub(crate) fn installed_plugins_mut(&mut self) -> &mut Vec<InstalledPlugin> {
        self.installed_plugins.get_or_insert_with(Vec::new)
    }
}

#[cfg(test)]
mod tests;
