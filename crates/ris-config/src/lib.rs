//! Shared configuration for the `ris` plugin manager.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then a
//! `ris.toml` configuration file, then `RIS_*` environment variables, then
//! command-line flags. The values steer how plugin identifiers and versions
//! are resolved and where the plugins cache lives inside a project. They do
//! not describe the project itself; the per-project plugin list is kept in the
//! project configuration file named by [`Config::configuration_file`].

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    CONFIGURATION_FILE, DEFAULT_LOG_FILTER, DEFAULT_PLUGIN_BRANCH, DEFAULT_PLUGINS_PATH,
    PLUGIN_GIT_PREFIX, PLUGIN_PACKAGE_PREFIX, PLUGINS_CACHE_PATH, default_configuration_file,
    default_log_filter, default_log_filter_string, default_log_format, default_package_manager,
    default_plugin_branch, default_plugin_git_prefix, default_plugin_package_prefix,
    default_plugins_cache_path,
};
pub use logging::{LogFormat, LogFormatParseError, PackageManagerKind};

/// Tool configuration resolved from defaults, files, environment and flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(
    prefix = "RIS",
    discovery(
        app_name = "ris",
        env_var = "RIS_CONFIG_PATH",
        config_file_name = "ris.toml",
        dotfile_name = ".ris.toml",
        project_file_name = "ris.toml",
        config_cli_long = "config-path",
        config_cli_visible = true,
    )
)]
pub struct Config {
    /// `tracing` filter expression applied to the subscriber.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format of log records.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Ref used when a dependency version does not name an exact release.
    #[ortho_config(default = defaults::default_plugin_branch())]
    pub default_plugin_branch: String,
    /// Prefix marking a plugin identifier as a git URL.
    #[ortho_config(default = defaults::default_plugin_git_prefix())]
    pub plugin_git_prefix: String,
    /// Package scope that marks a manifest dependency as a plugin.
    #[ortho_config(default = defaults::default_plugin_package_prefix())]
    pub plugin_package_prefix: String,
    /// Cache file location relative to the project root.
    #[ortho_config(default = defaults::default_plugins_cache_path())]
    pub plugins_cache_path: String,
    /// Project configuration file relative to the project root.
    #[ortho_config(default = defaults::default_configuration_file())]
    pub configuration_file: String,
    /// Package manager used unless the project asks for another one.
    #[ortho_config(default = defaults::default_package_manager())]
    pub package_manager: PackageManagerKind,
    /// JSON file listing known plugins that bare names resolve against.
    pub plugin_registry: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            default_plugin_branch: default_plugin_branch(),
            plugin_git_prefix: default_plugin_git_prefix(),
            plugin_package_prefix: default_plugin_package_prefix(),
            plugins_cache_path: default_plugins_cache_path(),
            configuration_file: default_configuration_file(),
            package_manager: default_package_manager(),
            plugin_registry: None,
        }
    }
}

impl Config {
    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Fallback ref for unparseable dependency versions.
    #[must_use]
    pub fn default_plugin_branch(&self) -> &str {
        &self.default_plugin_branch
    }

    /// URL prefix token for raw git plugin identifiers.
    #[must_use]
    pub fn plugin_git_prefix(&self) -> &str {
        &self.plugin_git_prefix
    }

    /// Package scope of plugin dependencies.
    #[must_use]
    pub fn plugin_package_prefix(&self) -> &str {
        &self.plugin_package_prefix
    }

    /// Relative cache file location.
    #[must_use]
    pub fn plugins_cache_path(&self) -> &str {
        &self.plugins_cache_path
    }

    /// Relative project configuration file location.
    #[must_use]
    pub fn configuration_file(&self) -> &str {
        &self.configuration_file
    }

    /// Default package manager.
    #[must_use]
    pub const fn package_manager(&self) -> PackageManagerKind {
        self.package_manager
    }

    /// Location of the plugin registry file, if configured.
    #[must_use]
    pub fn plugin_registry(&self) -> Option<&str> {
        self.plugin_registry.as_deref()
    }
}
