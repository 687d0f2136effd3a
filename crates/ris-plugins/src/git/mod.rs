//! Git primitives consumed by the installer.
//!
//! [`GitPrimitives`] is the seam between plugin bookkeeping and the git
//! executable. [`GitCli`] implements it by running `git` as a blocking child
//! process; tests substitute recording doubles.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use tracing::debug;

use crate::error::GitError;

/// Tracing target for git process operations.
const GIT_TARGET: &str = "ris_plugins::git";

const GIT_BINARY: &str = "git";

/// Git operations required to install plugins and bootstrap projects.
pub trait GitPrimitives {
    /// Clones `url` into `target_dir`, checking out `git_ref` when given.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if the clone cannot be performed.
    fn clone_repository(
        &self,
        target_dir: &Path,
        url: &str,
        git_ref: Option<&str>,
    ) -> Result<(), GitError>;

    /// Merges `url` at `git_ref` into the repository at `project_path` as a
    /// subtree rooted at `prefix`.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if the subtree cannot be added.
    fn add_subtree(
        &self,
        project_path: &Path,
        prefix: &str,
        name: &str,
        url: &str,
        git_ref: Option<&str>,
    ) -> Result<(), GitError>;

    /// Initialises a repository at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if initialisation fails.
    fn init(&self, path: &Path) -> Result<(), GitError>;

    /// Stages every change under `path` and commits it with `message`.
    ///
    /// # Errors
    ///
    /// Returns a [`GitError`] if staging or committing fails.
    fn commit(&self, path: &Path, message: &str) -> Result<(), GitError>;
}

/// Runs the `git` executable found on `PATH`.
///
/// Subtrees added without an explicit ref merge `default_branch`.
#[derive(Debug, Clone)]
pub struct GitCli {
    default_branch: String,
}

impl GitCli {
    /// Creates an adapter merging `default_branch` when no ref is given.
    #[must_use]
    pub fn new(default_branch: impl Into<String>) -> Self {
        Self {
            default_branch: default_branch.into(),
        }
    }

    fn run(&self, cwd: Option<&Path>, args: &[OsString]) -> Result<(), GitError> {
        let rendered = render_command(args);
        let mut command = Command::new(GIT_BINARY);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        debug!(target: GIT_TARGET, command = %rendered, "running git");

        let output = command.output().map_err(|source| GitError::Spawn {
            command: rendered.clone(),
            source: Arc::new(source),
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        debug!(
            target: GIT_TARGET,
            command = %rendered,
            status = ?output.status,
            %stderr,
            "git exited unsuccessfully"
        );
        Err(GitError::NonZeroExit {
            command: rendered,
            status: output.status.code().unwrap_or(-1),
            stderr,
        })
    }
}

impl GitPrimitives for GitCli {
    fn clone_repository(
        &self,
        target_dir: &Path,
        url: &str,
        git_ref: Option<&str>,
    ) -> Result<(), GitError> {
        if let Some(parent) = target_dir.parent() {
            std::fs::create_dir_all(parent).map_err(|source| GitError::Io {
                path: parent.to_path_buf(),
                source: Arc::new(source),
            })?;
        }
        self.run(None, &clone_args(target_dir, url, git_ref))
    }

    fn add_subtree(
        &self,
        project_path: &Path,
        prefix: &str,
        name: &str,
        url: &str,
        git_ref: Option<&str>,
    ) -> Result<(), GitError> {
        let merged_ref = git_ref.unwrap_or(&self.default_branch);
        self.run(
            Some(project_path),
            &subtree_args(prefix, name, url, merged_ref),
        )
    }

    fn init(&self, path: &Path) -> Result<(), GitError> {
        self.run(Some(path), &[OsString::from("init")])
    }

    fn commit(&self, path: &Path, message: &str) -> Result<(), GitError> {
        self.run(Some(path), &[OsString::from("add"), OsString::from("--all")])?;
        self.run(
            Some(path),
            &[
                OsString::from("commit"),
                OsString::from("-m"),
                OsString::from(message),
            ],
        )
    }
}

fn clone_args(target_dir: &Path, url: &str, git_ref: Option<&str>) -> Vec<OsString> {
    let mut args = vec![OsString::from("clone")];
    if let Some(git_ref) = git_ref {
        args.push(OsString::from("--branch"));
        args.push(OsString::from(git_ref));
    }
    args.push(OsString::from(url));
    args.push(target_dir.as_os_str().to_owned());
    args
}

fn subtree_args(prefix: &str, name: &str, url: &str, git_ref: &str) -> Vec<OsString> {
    vec![
        OsString::from("subtree"),
        OsString::from("add"),
        OsString::from(format!("--prefix={prefix}")),
        OsString::from("-m"),
        OsString::from(format!("Add plugin '{name}'")),
        OsString::from(url),
        OsString::from(git_ref),
    ]
}

fn render_command(args: &[OsString]) -> String {
    std::iter::once(OsStr::new(GIT_BINARY))
        .chain(args.iter().map(OsString::as_os_str))
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}
