//! In-memory project configuration.
//!
//! [`Configuration`] mirrors the project configuration document: the ordered
//! list of installed plugins, the clone URL each was installed from, the
//! install mode and the relative plugins directory. Reading and writing the
//! document is left to the caller; install tasks only mutate the in-memory
//! value. Keys this crate does not interpret are carried through untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Plugins directory used when a document does not name one.
const DEFAULT_PLUGINS_PATH: &str = "./packages";

/// How plugins are placed into a project.
///
/// # Example
///
/// ```
/// use ris_plugins::InstallMode;
///
/// assert_eq!(InstallMode::from("development"), InstallMode::Development);
/// assert_eq!(InstallMode::from("staging"), InstallMode::Production);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstallMode {
    /// Editable clone of the full repository.
    Development,
    /// History-preserving subtree merge into the host repository.
    #[default]
    Production,
}

impl InstallMode {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for InstallMode {
    fn from(value: &str) -> Self {
        if value == Self::Development.as_str() {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl From<String> for InstallMode {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<InstallMode> for String {
    fn from(mode: InstallMode) -> Self {
        mode.as_str().to_owned()
    }
}

fn default_plugins_path() -> String {
    DEFAULT_PLUGINS_PATH.to_owned()
}

/// Plugin bookkeeping for one project.
///
/// # Example
///
/// ```
/// use ris_plugins::{Configuration, InstallMode};
///
/// let mut configuration = Configuration::new("./packages", InstallMode::Development);
/// assert!(configuration.record_plugin("rispa-core", "https://git.com/x/rispa-core.git"));
/// assert!(!configuration.record_plugin("rispa-core", "https://git.com/x/rispa-core.git"));
/// assert_eq!(configuration.plugins(), ["rispa-core"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    plugins: Vec<String>,
    #[serde(default)]
    remotes: BTreeMap<String, String>,
    #[serde(default)]
    mode: InstallMode,
    #[serde(default = "default_plugins_path")]
    plugins_path: String,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(DEFAULT_PLUGINS_PATH, InstallMode::default())
    }
}

impl Configuration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new(plugins_path: impl Into<String>, mode: InstallMode) -> Self {
        Self {
            plugins: Vec::new(),
            remotes: BTreeMap::new(),
            mode,
            plugins_path: plugins_path.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Installed plugin names in installation order.
    #[must_use]
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Clone URL per installed plugin.
    #[must_use]
    pub const fn remotes(&self) -> &BTreeMap<String, String> {
        &self.remotes
    }

    /// Clone URL recorded for `name`.
    #[must_use]
    pub fn remote(&self, name: &str) -> Option<&str> {
        self.remotes.get(name).map(String::as_str)
    }

    /// Configured install mode.
    #[must_use]
    pub const fn mode(&self) -> InstallMode {
        self.mode
    }

    /// Overrides the install mode.
    pub const fn set_mode(&mut self, mode: InstallMode) {
        self.mode = mode;
    }

    /// Plugins directory relative to the project root.
    #[must_use]
    pub const fn plugins_path(&self) -> &str {
        self.plugins_path.as_str()
    }

    /// Keys of the document this crate does not interpret.
    #[must_use]
    pub const fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    /// Returns `true` when `name` is already listed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin == name)
    }

    /// Lists `name` as installed from `clone_url`.
    ///
    /// The plugin list and the remotes map are updated together. Returns
    /// `false` and changes nothing when `name` is already listed.
    pub fn record_plugin(&mut self, name: &str, clone_url: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.plugins.push(name.to_owned());
        self.remotes.insert(name.to_owned(), clone_url.to_owned());
        true
    }

    /// Names listed in only one of `plugins` and `remotes`.
    ///
    /// An empty result means the document is consistent.
    #[must_use]
    pub fn unpaired_names(&self) -> Vec<&str> {
        let missing_remote = self
            .plugins
            .iter()
            .filter(|name| !self.remotes.contains_key(name.as_str()));
        let missing_plugin = self.remotes.keys().filter(|name| !self.contains(name));
        missing_remote
            .chain(missing_plugin)
            .map(String::as_str)
            .collect()
    }
}
