//! Access to a plugin's `package.json`.
//!
//! Manifests are read permissively: a missing, unreadable or non-object
//! document is treated as empty so that dependency planning simply finds
//! nothing to do. Keys this crate does not interpret are kept and written
//! back unchanged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PluginError;

/// Tracing target for manifest operations.
const MANIFEST_TARGET: &str = "ris_plugins::manifest";

/// File name of a package manifest inside a plugin directory.
pub const PACKAGE_JSON: &str = "package.json";

const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "devDependencies";

/// Parsed `package.json` document.
///
/// # Example
///
/// ```
/// use ris_plugins::PackageManifest;
/// use serde_json::json;
///
/// let manifest = PackageManifest::from_value(json!({
///     "name": "@rispa/server",
///     "dependencies": { "@rispa/core": "^1.2.0" },
///     "devDependencies": { "@rispa/core": "1.3.0" },
/// }));
/// assert_eq!(manifest.name(), Some("@rispa/server"));
/// assert_eq!(
///     manifest.dependencies().get("@rispa/core").map(String::as_str),
///     Some("1.3.0")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Wraps a JSON value; anything but an object yields an empty manifest.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(document) => Self { document },
            _ => Self::default(),
        }
    }

    /// Reads `package.json` from `plugin_dir`, falling back to an empty
    /// manifest.
    #[must_use]
    pub fn read(plugin_dir: &Path) -> Self {
        let path = plugin_dir.join(PACKAGE_JSON);
        let parsed = std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str::<Value>(&contents).ok());
        parsed.map_or_else(
            || {
                debug!(
                    target: MANIFEST_TARGET,
                    path = %path.display(),
                    "no readable package manifest"
                );
                Self::default()
            },
            Self::from_value,
        )
    }

    /// Package name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    /// Package version.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.document.get("version").and_then(Value::as_str)
    }

    /// Runtime and development dependencies merged into one map.
    ///
    /// A development entry replaces a runtime entry of the same name.
    /// Entries whose version is not a string are ignored.
    #[must_use]
    pub fn dependencies(&self) -> BTreeMap<String, String> {
        [DEPENDENCIES, DEV_DEPENDENCIES]
            .into_iter()
            .filter_map(|section| self.document.get(section).and_then(Value::as_object))
            .flat_map(|entries| {
                entries.iter().filter_map(|(name, version)| {
                    version.as_str().map(|text| (name.clone(), text.to_owned()))
                })
            })
            .collect()
    }

    /// Underlying JSON object.
    #[must_use]
    pub const fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Mutable access to the JSON object.
    pub const fn document_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.document
    }

    /// Writes the manifest to `plugin_dir` as two-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Manifest`] when the document cannot be
    /// serialised or written.
    pub fn save(&self, plugin_dir: &Path) -> Result<PathBuf, PluginError> {
        let path = plugin_dir.join(PACKAGE_JSON);
        let data =
            serde_json::to_string_pretty(&self.document).map_err(|error| PluginError::Manifest {
                path: path.clone(),
                message: error.to_string(),
            })?;
        std::fs::write(&path, data).map_err(|error| PluginError::Manifest {
            path: path.clone(),
            message: error.to_string(),
        })?;
        Ok(path)
    }
}
