//! Tests for the CLI runner.

use std::ffi::OsString;

use ris_config::Config;

use super::*;

struct StubLoader {
    fail: bool,
}

impl ConfigLoader for StubLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        if self.fail {
            Err(AppError::Output(std::io::Error::other("loader failed")))
        } else {
            Ok(Config::default())
        }
    }
}

fn run_args(args: &[&str], loader: &StubLoader) -> (ExitCode, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let exit = run_with_loader(
        args.iter().map(OsString::from),
        &mut stdout,
        &mut stderr,
        loader,
    );
    (
        exit,
        String::from_utf8(stdout).expect("utf8 stdout"),
        String::from_utf8(stderr).expect("utf8 stderr"),
    )
}

#[test]
fn cache_clear_succeeds_for_project_path() {
    let project = tempfile::tempdir().expect("create temp dir");
    let project_path = project.path().to_string_lossy().into_owned();
    let (exit, stdout, stderr) = run_args(
        &["ris", "cache", "clear", "--project-path", &project_path],
        &StubLoader { fail: false },
    );

    assert_eq!(exit, ExitCode::SUCCESS, "stderr: {stderr}");
    assert!(stdout.starts_with("removed"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let (exit, _, stderr) = run_args(&["ris"], &StubLoader { fail: false });
    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn help_goes_to_stdout() {
    let (exit, stdout, _) = run_args(&["ris", "--help"], &StubLoader { fail: false });
    assert_eq!(exit, ExitCode::SUCCESS);
    assert!(stdout.contains("add"));
}

#[test]
fn loader_failure_is_reported() {
    let (exit, _, stderr) = run_args(&["ris", "cache", "clear"], &StubLoader { fail: true });
    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("loader failed"), "stderr: {stderr}");
}

#[test]
fn add_outside_project_reports_missing_configuration() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let project_path = dir.path().to_string_lossy().into_owned();
    let (exit, _, stderr) = run_args(
        &["ris", "add", "rispa-core", "--project-path", &project_path],
        &StubLoader { fail: false },
    );
    assert_eq!(exit, ExitCode::FAILURE);
    assert!(stderr.contains("is this a ris project?"), "stderr: {stderr}");
}
