//! Package manager invocation for freshly bootstrapped projects.
//!
//! [`PackageManager`] runs a blocking `install` in the project directory;
//! [`ProcessPackageManager`] spawns the real executable with inherited
//! standard streams. [`select_program`] chooses between `npm` and `yarn`.

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PluginError;

/// Tracing target for package manager operations.
const PACKAGE_MANAGER_TARGET: &str = "ris_plugins::package_manager";

/// Executable name of yarn.
pub const YARN: &str = "yarn";

/// File declaring lerna settings, including the preferred npm client.
pub const LERNA_JSON: &str = "lerna.json";

/// Installs project dependencies.
pub trait PackageManager {
    /// Runs the dependency install for the project at `project_path`.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::PackageManagerSpawn`] when the process cannot
    /// start and [`PluginError::PackageManagerFailed`] on a non-zero exit.
    fn install(&self, project_path: &Path) -> Result<(), PluginError>;
}

/// Spawns `<program> install` as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessPackageManager {
    program: String,
}

impl ProcessPackageManager {
    /// Creates a package manager running `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executable invoked by [`PackageManager::install`].
    #[must_use]
    pub const fn program(&self) -> &str {
        self.program.as_str()
    }
}

impl PackageManager for ProcessPackageManager {
    fn install(&self, project_path: &Path) -> Result<(), PluginError> {
        debug!(
            target: PACKAGE_MANAGER_TARGET,
            program = %self.program,
            cwd = %project_path.display(),
            "running package install"
        );

        let status = Command::new(&self.program)
            .arg("install")
            .current_dir(project_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| PluginError::PackageManagerSpawn {
                program: self.program.clone(),
                source: Arc::new(source),
            })?;

        if status.success() {
            return Ok(());
        }

        warn!(
            target: PACKAGE_MANAGER_TARGET,
            program = %self.program,
            ?status,
            "package install failed"
        );
        Err(PluginError::PackageManagerFailed {
            program: self.program.clone(),
            status: status.code().unwrap_or(-1),
        })
    }
}

/// Chooses the package manager executable for `project_path`.
///
/// `yarn` is used when requested or when the project's `lerna.json` sets
/// `npmClient` to `yarn`; otherwise `default_program` is returned.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use ris_plugins::select_program;
///
/// assert_eq!(select_program(Path::new("/nonexistent"), true, "npm"), "yarn");
/// assert_eq!(select_program(Path::new("/nonexistent"), false, "npm"), "npm");
/// ```
#[must_use]
pub fn select_program(project_path: &Path, prefer_yarn: bool, default_program: &str) -> String {
    if prefer_yarn || lerna_client(project_path).as_deref() == Some(YARN) {
        String::from(YARN)
    } else {
        default_program.to_owned()
    }
}

fn lerna_client(project_path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(project_path.join(LERNA_JSON)).ok()?;
    let document: Value = serde_json::from_str(&contents).ok()?;
    document
        .get("npmClient")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::yarn_client(r#"{"npmClient": "yarn"}"#, "yarn")]
    #[case::npm_client(r#"{"npmClient": "npm"}"#, "npm")]
    #[case::no_client(r#"{"version": "independent"}"#, "npm")]
    #[case::corrupt("{", "npm")]
    fn lerna_settings_choose_program(#[case] lerna: &str, #[case] expected: &str) {
        let project = tempfile::tempdir().expect("create temp dir");
        std::fs::write(project.path().join(LERNA_JSON), lerna).expect("write lerna.json");
        assert_eq!(select_program(project.path(), false, "npm"), expected);
    }

    #[test]
    fn explicit_yarn_wins_over_lerna() {
        let project = tempfile::tempdir().expect("create temp dir");
        std::fs::write(project.path().join(LERNA_JSON), r#"{"npmClient": "npm"}"#)
            .expect("write lerna.json");
        assert_eq!(select_program(project.path(), true, "npm"), "yarn");
    }

    #[test]
    fn missing_program_reports_spawn_failure() {
        let project = tempfile::tempdir().expect("create temp dir");
        let manager = ProcessPackageManager::new("ris-test-missing-package-manager");
        let err = manager
            .install(project.path())
            .expect_err("install should fail");
        assert!(matches!(err, PluginError::PackageManagerSpawn { ref program, .. }
            if program == "ris-test-missing-package-manager"));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_fatal() {
        let project = tempfile::tempdir().expect("create temp dir");
        let manager = ProcessPackageManager::new("false");
        let err = manager
            .install(project.path())
            .expect_err("install should fail");
        assert!(matches!(err, PluginError::PackageManagerFailed { status: 1, .. }));
    }
}
