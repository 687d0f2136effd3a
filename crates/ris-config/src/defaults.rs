//! Built-in defaults shared by the configuration loader and the CLI.

use crate::logging::{LogFormat, PackageManagerKind};

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Branch checked out when a dependency version cannot be turned into a tag.
pub const DEFAULT_PLUGIN_BRANCH: &str = "master";

/// Token marking a plugin identifier as a raw git URL (`git+https://...`).
pub const PLUGIN_GIT_PREFIX: &str = "git+";

/// Scope prefix shared by plugin package names.
pub const PLUGIN_PACKAGE_PREFIX: &str = "@rispa/";

/// Location of the plugins cache, relative to the project root.
pub const PLUGINS_CACHE_PATH: &str = "node_modules/.cache/rispa/plugins.json";

/// Location of the project configuration file, relative to the project root.
pub const CONFIGURATION_FILE: &str = ".rispa.json";

/// Plugins directory written into freshly created projects.
pub const DEFAULT_PLUGINS_PATH: &str = "./packages";

/// Default log filter expression used by the binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned default plugin branch.
pub fn default_plugin_branch() -> String {
    DEFAULT_PLUGIN_BRANCH.to_owned()
}

/// Owned default git URL prefix.
pub fn default_plugin_git_prefix() -> String {
    PLUGIN_GIT_PREFIX.to_owned()
}

/// Owned default plugin package scope.
pub fn default_plugin_package_prefix() -> String {
    PLUGIN_PACKAGE_PREFIX.to_owned()
}

/// Owned default cache location.
pub fn default_plugins_cache_path() -> String {
    PLUGINS_CACHE_PATH.to_owned()
}

/// Owned default configuration file name.
pub fn default_configuration_file() -> String {
    CONFIGURATION_FILE.to_owned()
}

/// Package manager used when the project does not ask for another one.
pub fn default_package_manager() -> PackageManagerKind {
    PackageManagerKind::Npm
}
