//! Domain errors raised by plugin lifecycle operations.
//!
//! All errors use `thiserror`-derived enums with structured context so callers
//! can inspect the failure programmatically. I/O errors are wrapped in `Arc`
//! to satisfy the `result_large_err` Clippy lint.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors reported by the git primitives.
#[derive(Debug, Error)]
pub enum GitError {
    /// The `git` process could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The `git` process exited unsuccessfully.
    #[error("`{command}` exited with status {status}: {stderr}")]
    NonZeroExit {
        /// Rendered command line.
        command: String,
        /// Process exit status, `-1` when terminated by a signal.
        status: i32,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// Preparing the filesystem for a git operation failed.
    #[error("failed to prepare '{}' for git: {source}", path.display())]
    Io {
        /// Path being prepared.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// Errors arising from reading or writing the plugins cache.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A path lists a plugin that has no central metadata entry.
    #[error("plugin '{name}' listed under '{path}' has no cached metadata")]
    MissingMetadata {
        /// Scan path that references the plugin.
        path: String,
        /// Plugin name lacking metadata.
        name: String,
    },

    /// The cache document could not be serialised.
    #[error("failed to serialise plugins cache: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing the cache file failed.
    #[error("failed to write plugins cache '{}': {source}", path.display())]
    Write {
        /// Cache file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// Deleting the cache file failed.
    #[error("failed to remove plugins cache '{}': {source}", path.display())]
    Remove {
        /// Cache file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// Errors arising from plugin installation and project setup.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The clone URL does not point at a git repository.
    #[error("invalid plugin remote url '{url}' for plugin '{name}'")]
    InvalidCloneUrl {
        /// Plugin that was being installed.
        name: String,
        /// Rejected URL.
        url: String,
    },

    /// The identifier could not be resolved to a clone URL.
    #[error("can't find plugin '{name}'")]
    UnresolvedPlugin {
        /// Identifier that failed to resolve.
        name: String,
    },

    /// Cloning the plugin repository failed.
    #[error("can't clone repository '{url}' for plugin '{name}': {source}")]
    CloneFailed {
        /// Plugin that was being installed.
        name: String,
        /// Repository URL.
        url: String,
        /// Failure reported by git.
        #[source]
        source: GitError,
    },

    /// Adding the plugin as a subtree failed.
    #[error("can't add subtree '{prefix}' for plugin '{name}': {source}")]
    SubtreeFailed {
        /// Plugin that was being installed.
        name: String,
        /// Subtree prefix inside the host project.
        prefix: String,
        /// Failure reported by git.
        #[source]
        source: GitError,
    },

    /// The project directory already exists.
    #[error("the directory '{name}' already exists, try using a new project name")]
    ProjectAlreadyExists {
        /// Requested project name.
        name: String,
        /// Resolved project directory.
        path: PathBuf,
    },

    /// The package manager could not be started.
    #[error("failed to start package manager '{program}': {source}")]
    PackageManagerSpawn {
        /// Package manager executable.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The package manager exited with a non-zero status.
    #[error("package manager '{program}' exited with non-zero status {status}")]
    PackageManagerFailed {
        /// Package manager executable.
        program: String,
        /// Process exit status, `-1` when terminated by a signal.
        status: i32,
    },

    /// A git primitive other than clone or subtree failed.
    #[error("git operation failed: {0}")]
    Git(#[from] GitError),

    /// The plugins cache could not be persisted.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// A package manifest could not be written.
    #[error("failed to write package manifest '{}': {message}", path.display())]
    Manifest {
        /// Manifest location.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// A project file or directory could not be prepared.
    #[error("failed to prepare '{}': {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}
