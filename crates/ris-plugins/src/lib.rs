//! Plugin lifecycle management for `ris` projects.
//!
//! A plugin is a git repository installed into a host project. In
//! development mode it is cloned as an editable checkout under the plugins
//! directory; in production mode its history is merged into the host
//! repository as a subtree. Installs are idempotent: a plugin already listed
//! in the project [`Configuration`] is skipped.
//!
//! # Architecture
//!
//! Components are layered leaves first:
//!
//! - [`VersionResolver`] maps a dependency version expression to a git ref.
//! - [`PluginFinder`] resolves a name, package name, alias or raw URL to a
//!   [`PluginSpec`].
//! - [`InstallTask`] installs one plugin through the [`GitPrimitives`] seam
//!   and records it in the shared [`TaskContext`].
//! - [`DependencyPlanner`] chains installs through plugin manifests.
//! - [`PluginsCacheStore`] persists where plugins live between runs.
//! - [`ProjectBootstrap`] creates a project and installs its first plugins.
//!
//! Execution is synchronous; tasks of one run share a context by mutable
//! reference and the first failure ends the run.
//!
//! # Example
//!
//! ```
//! use ris_plugins::{Configuration, InstallMode, PluginFinder, PluginSpec};
//!
//! let finder = PluginFinder::new(
//!     "git+",
//!     vec![PluginSpec::new("rispa-core").with_package_name("@rispa/core")],
//! );
//! assert_eq!(finder.find("@rispa/core").name(), "rispa-core");
//!
//! let url_spec = finder.find("git+https://git.com/x/rispa-foo.git");
//! assert_eq!(url_spec.name(), "rispa-foo");
//! assert_eq!(url_spec.clone_url(), Some("https://git.com/x/rispa-foo.git"));
//!
//! let configuration = Configuration::new("./packages", InstallMode::Development);
//! assert!(configuration.plugins().is_empty());
//! ```

pub mod cache;
pub mod configuration;
pub mod context;
pub mod error;
pub mod finder;
pub mod git;
pub mod install;
pub mod manifest;
pub mod package_manager;
mod paths;
pub mod plan;
pub mod project;
pub mod version;

#[cfg(test)]
mod tests;

pub use self::cache::{PluginsCache, PluginsCacheStore};
pub use self::configuration::{Configuration, InstallMode};
pub use self::context::{InstalledPlugin, TaskContext};
pub use self::error::{CacheError, GitError, PluginError};
pub use self::finder::{
    PluginFinder, PluginIdentifier, PluginSpec, extract_plugin_name_from_url, find_in_list,
};
pub use self::git::{GitCli, GitPrimitives};
pub use self::install::{InstallOutcome, InstallTask, install_plugins};
pub use self::manifest::PackageManifest;
pub use self::package_manager::{PackageManager, ProcessPackageManager, select_program};
pub use self::plan::DependencyPlanner;
pub use self::project::{CreatedProject, ProjectBootstrap, ProjectGenerator, ensure_project_absent};
pub use self::version::{SemVersion, VersionResolver, compare};
