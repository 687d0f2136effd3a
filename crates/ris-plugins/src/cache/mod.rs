//! On-disk index of plugin locations.
//!
//! The cache maps each scanned plugins directory to the set of plugin names
//! found there, and keeps one metadata entry per plugin under `plugins`.
//! Reading is permissive: a missing or corrupt file yields an empty cache,
//! because the index only saves later runs a filesystem scan.

use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::context::InstalledPlugin;
use crate::error::CacheError;

/// Tracing target for cache operations.
const CACHE_TARGET: &str = "ris_plugins::cache";

/// Plugin names per scan path plus central plugin metadata.
///
/// # Example
///
/// ```
/// use ris_plugins::PluginsCache;
///
/// let cache = PluginsCache::new();
/// assert!(cache.paths().is_empty());
/// assert!(cache.plugins().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginsCache {
    #[serde(default)]
    paths: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    plugins: BTreeMap<String, Value>,
}

impl PluginsCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paths: BTreeMap::new(),
            plugins: BTreeMap::new(),
        }
    }

    /// Plugin names per scan path.
    #[must_use]
    pub const fn paths(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.paths
    }

    /// Metadata per plugin name.
    #[must_use]
    pub const fn plugins(&self) -> &BTreeMap<String, Value> {
        &self.plugins
    }

    /// Names cached under `path`.
    #[must_use]
    pub fn names_at(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.paths.get(path)
    }

    /// Folds plugins installed during a run into the cache.
    ///
    /// Each plugin is listed under its plugins directory and its clone URL,
    /// ref and location are stored as metadata, replacing older entries.
    pub fn record_installed(&mut self, installed: &[InstalledPlugin]) {
        for plugin in installed {
            let scan_path = plugin
                .path()
                .parent()
                .unwrap_or_else(|| plugin.path())
                .to_string_lossy()
                .into_owned();
            self.paths
                .entry(scan_path)
                .or_default()
                .insert(plugin.name().to_owned());
            self.plugins
                .insert(plugin.name().to_owned(), plugin_metadata(plugin));
        }
    }

    fn validate(&self) -> Result<(), CacheError> {
        for (path, names) in &self.paths {
            if let Some(name) = names.iter().find(|name| !self.plugins.contains_key(*name)) {
                return Err(CacheError::MissingMetadata {
                    path: path.clone(),
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }
}

fn plugin_metadata(plugin: &InstalledPlugin) -> Value {
    let mut metadata = Map::new();
    metadata.insert(
        String::from("cloneUrl"),
        Value::String(plugin.clone_url().to_owned()),
    );
    if let Some(git_ref) = plugin.git_ref() {
        metadata.insert(String::from("ref"), Value::String(git_ref.to_owned()));
    }
    metadata.insert(
        String::from("path"),
        Value::String(plugin.path().to_string_lossy().into_owned()),
    );
    Value::Object(metadata)
}

/// Location of the cache document inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginsCacheStore {
    path: PathBuf,
}

impl PluginsCacheStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store for `relative` resolved against `project_path`.
    #[must_use]
    pub fn for_project(project_path: &Path, relative: impl AsRef<Path>) -> Self {
        Self::new(project_path.join(relative))
    }

    /// Cache file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cache, falling back to an empty one.
    ///
    /// A document that parses but names a plugin without metadata is treated
    /// like a corrupt one.
    ///
    /// # Example
    ///
    /// ```
    /// use ris_plugins::{PluginsCache, PluginsCacheStore};
    ///
    /// let store = PluginsCacheStore::new("/nonexistent/plugins.json");
    /// assert_eq!(store.read(), PluginsCache::new());
    /// ```
    #[must_use]
    pub fn read(&self) -> PluginsCache {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(target: CACHE_TARGET, path = %self.path.display(), "no plugins cache");
                return PluginsCache::new();
            }
            Err(error) => {
                warn!(
                    target: CACHE_TARGET,
                    path = %self.path.display(),
                    %error,
                    "unreadable plugins cache, starting empty"
                );
                return PluginsCache::new();
            }
        };

        let cache: PluginsCache = match serde_json::from_str(&contents) {
            Ok(cache) => cache,
            Err(error) => {
                warn!(
                    target: CACHE_TARGET,
                    path = %self.path.display(),
                    %error,
                    "corrupt plugins cache, starting empty"
                );
                return PluginsCache::new();
            }
        };

        if let Err(error) = cache.validate() {
            warn!(
                target: CACHE_TARGET,
                path = %self.path.display(),
                %error,
                "inconsistent plugins cache, starting empty"
            );
            return PluginsCache::new();
        }
        cache
    }

    /// Writes plugins grouped by path together with the central metadata.
    ///
    /// Each path keeps only the names of its entries; metadata is stored
    /// once under `plugins`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::MissingMetadata`] before touching the disk when
    /// a path names a plugin absent from `plugins`, and a write error when
    /// the file cannot be stored.
    pub fn write(
        &self,
        by_paths: &BTreeMap<String, BTreeMap<String, Value>>,
        plugins: &BTreeMap<String, Value>,
    ) -> Result<(), CacheError> {
        let cache = PluginsCache {
            paths: by_paths
                .iter()
                .map(|(path, entries)| (path.clone(), entries.keys().cloned().collect()))
                .collect(),
            plugins: plugins.clone(),
        };
        self.save(&cache)
    }

    /// Persists `cache` as two-space indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::MissingMetadata`] when the cache is
    /// inconsistent, otherwise a serialisation or write error.
    pub fn save(&self, cache: &PluginsCache) -> Result<(), CacheError> {
        cache.validate()?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CacheError::Write {
                path: parent.to_path_buf(),
                source: Arc::new(source),
            })?;
        }

        let data = serde_json::to_string_pretty(cache).map_err(CacheError::Serialize)?;
        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, data).map_err(|source| CacheError::Write {
            path: staging.clone(),
            source: Arc::new(source),
        })?;
        std::fs::rename(&staging, &self.path).map_err(|source| CacheError::Write {
            path: self.path.clone(),
            source: Arc::new(source),
        })?;

        debug!(target: CACHE_TARGET, path = %self.path.display(), "saved plugins cache");
        Ok(())
    }

    /// Deletes the cache file; a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Remove`] when an existing file cannot be
    /// deleted.
    pub fn remove(&self) -> Result<(), CacheError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Remove {
                path: self.path.clone(),
                source: Arc::new(source),
            }),
        }
    }
}
