//! Crate-level test doubles and BDD scenarios.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::GitError;
use crate::git::GitPrimitives;


/// A git primitive invocation observed by [`RecordingGit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum GitCall {
    Clone {
        target_dir: PathBuf,
        url: String,
        git_ref: Option<String>,
    },
    Subtree {
        project_path: PathBuf,
        prefix: String,
        name: String,
        url: String,
        git_ref: Option<String>,
    },
    Init {
        path: PathBuf,
    },
    Commit {
        path: PathBuf,
        message: String,
    },
}

/// Records every call; fails calls whose URL or message matches `fail_on`.
#[derive(Debug, Default)]
pub(crate) struct RecordingGit {
    calls: RefCell<Vec<GitCall>>,
    fail_on: Option<String>,
}

impl RecordingGit {
    pub(crate) fn failing_on(needle: &str) -> Self {
        Self {
            calls: RefCell::default(),
            fail_on: Some(needle.to_owned()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: GitCall, subject: &str) -> Result<(), GitError> {
        self.calls.borrow_mut().push(call);
        match &self.fail_on {
            Some(needle) if subject.contains(needle.as_str()) => Err(GitError::NonZeroExit {
                command: format!("git {subject}"),
                status: 128,
                stderr: String::from("fatal: simulated failure"),
            }),
            _ => Ok(()),
        }
    }
}

impl GitPrimitives for RecordingGit {
    fn clone_repository(
        &self,
        target_dir: &Path,
        url: &str,
        git_ref: Option<&str>,
    ) -> Result<(), GitError> {
        self.record(
            GitCall::Clone {
                target_dir: target_dir.to_path_buf(),
                url: url.to_owned(),
                git_ref: git_ref.map(str::to_owned),
            },
            url,
        )
    }

    fn add_subtree(
        &self,
        project_path: &Path,
        prefix: &str,
        name: &str,
        url: &str,
        git_ref: Option<&str>,
    ) -> Result<(), GitError> {
        self.record(
            GitCall::Subtree {
                project_path: project_path.to_path_buf(),
                prefix: prefix.to_owned(),
                name: name.to_owned(),
                url: url.to_owned(),
                git_ref: git_ref.map(str::to_owned),
            },
            url,
        )
    }

    fn init(&self, path: &Path) -> Result<(), GitError> {
        self.record(
            GitCall::Init {
                path: path.to_path_buf(),
            },
            "init",
        )
    }

    fn commit(&self, path: &Path, message: &str) -> Result<(), GitError> {
        self.record(
            GitCall::Commit {
                path: path.to_path_buf(),
                message: message.to_owned(),
            },
            message,
        )
    }
}
