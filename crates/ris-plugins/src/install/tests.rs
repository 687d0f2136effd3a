//! Unit tests for the install task.

use std::path::PathBuf;

use rstest::{fixture, rstest};

use super::*;
use crate::configuration::Configuration;
use crate::tests::{GitCall, RecordingGit};

const CORE_URL: &str = "https://git.com/x/rispa-core.git";
const SERVER_URL: &str = "https://git.com/x/rispa-server.git";

fn context_in(mode: InstallMode) -> TaskContext {
    TaskContext::new("/work/project", Configuration::new("./packages", mode))
}

#[fixture]
fn development() -> TaskContext {
    context_in(InstallMode::Development)
}

#[fixture]
fn production() -> TaskContext {
    context_in(InstallMode::Production)
}

#[fixture]
fn core_task() -> InstallTask {
    InstallTask::new("rispa-core").with_clone_url(CORE_URL)
}

#[rstest]
fn development_mode_clones_into_plugins_directory(
    mut development: TaskContext,
    core_task: InstallTask,
) {
    let git = RecordingGit::default();
    let outcome = core_task.run(&mut development, &git).expect("install");

    assert!(!outcome.is_skipped());
    assert_eq!(
        git.calls(),
        vec![GitCall::Clone {
            target_dir: PathBuf::from("/work/project/packages/rispa-core"),
            url: CORE_URL.to_owned(),
            git_ref: None,
        }]
    );
    assert_eq!(development.configuration().plugins(), ["rispa-core"]);
    assert_eq!(development.configuration().remote("rispa-core"), Some(CORE_URL));
    assert_eq!(development.installed_plugins().len(), 1);
}

#[rstest]
fn development_clone_passes_requested_ref(mut development: TaskContext) {
    let git = RecordingGit::default();
    InstallTask::new("rispa-core")
        .with_clone_url(CORE_URL)
        .with_ref("v2.0.1")
        .run(&mut development, &git)
        .expect("install");

    assert!(matches!(
        git.calls().as_slice(),
        [GitCall::Clone { git_ref: Some(git_ref), .. }] if git_ref == "v2.0.1"
    ));
}

#[rstest]
fn production_mode_adds_subtree_under_relative_prefix(
    mut production: TaskContext,
    core_task: InstallTask,
) {
    let git = RecordingGit::default();
    core_task.run(&mut production, &git).expect("install");

    assert_eq!(
        git.calls(),
        vec![GitCall::Subtree {
            project_path: PathBuf::from("/work/project"),
            prefix: String::from("packages/rispa-core"),
            name: String::from("rispa-core"),
            url: CORE_URL.to_owned(),
            git_ref: None,
        }]
    );
    assert_eq!(production.configuration().plugins(), ["rispa-core"]);
}

#[rstest]
fn already_listed_plugin_is_skipped_without_side_effects(
    mut development: TaskContext,
    core_task: InstallTask,
) {
    let git = RecordingGit::default();
    core_task.run(&mut development, &git).expect("first install");
    let before = development.configuration().clone();

    let outcome = core_task.run(&mut development, &git).expect("second install");

    assert_eq!(
        outcome,
        InstallOutcome::AlreadyInstalled {
            name: String::from("rispa-core")
        }
    );
    assert_eq!(git.calls().len(), 1);
    assert_eq!(development.configuration(), &before);
    assert_eq!(development.installed_plugins().len(), 1);
}

#[rstest]
#[case::no_git_suffix("https://git.com/x/y")]
#[case::suffix_inside_path("https://git.com/x.git/y")]
fn clone_url_without_git_suffix_is_rejected(mut development: TaskContext, #[case] url: &str) {
    let git = RecordingGit::default();
    let err = InstallTask::new("y")
        .with_clone_url(url)
        .run(&mut development, &git)
        .expect_err("install should fail");

    assert!(matches!(err, PluginError::InvalidCloneUrl { .. }));
    assert!(git.calls().is_empty());
    assert_eq!(development.configuration(), &Configuration::new("./packages", InstallMode::Development));
}

#[rstest]
fn missing_clone_url_is_unresolved(mut development: TaskContext) {
    let git = RecordingGit::default();
    let err = InstallTask::new("rispa-unknown")
        .run(&mut development, &git)
        .expect_err("install should fail");

    assert!(matches!(err, PluginError::UnresolvedPlugin { name } if name == "rispa-unknown"));
    assert!(git.calls().is_empty());
}

#[rstest]
fn clone_failure_leaves_configuration_untouched(
    mut development: TaskContext,
    core_task: InstallTask,
) {
    let git = RecordingGit::failing_on("rispa-core");
    let err = core_task
        .run(&mut development, &git)
        .expect_err("install should fail");

    assert!(matches!(err, PluginError::CloneFailed { .. }));
    assert!(development.configuration().plugins().is_empty());
    assert!(development.installed_plugins().is_empty());
}

#[rstest]
fn subtree_failure_reports_prefix(mut production: TaskContext, core_task: InstallTask) {
    let git = RecordingGit::failing_on("rispa-core");
    let err = core_task
        .run(&mut production, &git)
        .expect_err("install should fail");

    assert!(
        matches!(&err, PluginError::SubtreeFailed { prefix, .. } if prefix == "packages/rispa-core")
    );
    assert!(production.configuration().remotes().is_empty());
}

#[rstest]
fn context_overrides_take_precedence(core_task: InstallTask) {
    let mut context = context_in(InstallMode::Production)
        .with_mode(InstallMode::Development)
        .with_plugins_path("/opt/plugins");
    let git = RecordingGit::default();
    core_task.run(&mut context, &git).expect("install");

    assert!(matches!(
        git.calls().as_slice(),
        [GitCall::Clone { target_dir, .. }] if target_dir == &PathBuf::from("/opt/plugins/rispa-core")
    ));
}

#[rstest]
fn sequence_stops_at_first_failure(mut development: TaskContext) {
    let git = RecordingGit::failing_on("rispa-server");
    let tasks = [
        InstallTask::new("rispa-core").with_clone_url(CORE_URL),
        InstallTask::new("rispa-server").with_clone_url(SERVER_URL),
        InstallTask::new("rispa-client").with_clone_url("https://git.com/x/rispa-client.git"),
    ];

    let err = install_plugins(&tasks, &mut development, &git).expect_err("run should fail");

    assert!(matches!(err, PluginError::CloneFailed { name, .. } if name == "rispa-server"));
    assert_eq!(git.calls().len(), 2);
    assert_eq!(development.configuration().plugins(), ["rispa-core"]);
}

#[rstest]
fn sequence_reports_each_outcome(mut development: TaskContext) {
    development
        .configuration_mut()
        .record_plugin("rispa-core", CORE_URL);
    let git = RecordingGit::default();
    let tasks = [
        InstallTask::new("rispa-core").with_clone_url(CORE_URL),
        InstallTask::new("rispa-server").with_clone_url(SERVER_URL),
    ];

    let outcomes = install_plugins(&tasks, &mut development, &git).expect("run");

    let skipped: Vec<bool> = outcomes.iter().map(InstallOutcome::is_skipped).collect();
    assert_eq!(skipped, [true, false]);
    assert_eq!(
        development.configuration().plugins(),
        ["rispa-core", "rispa-server"]
    );
}

#[test]
fn task_from_spec_copies_clone_url() {
    let spec = crate::finder::PluginSpec::new("rispa-core").with_clone_url(CORE_URL);
    let task = InstallTask::from_spec(&spec);
    assert_eq!(task.name(), "rispa-core");
    assert_eq!(task.clone_url(), Some(CORE_URL));
    assert_eq!(task.git_ref(), None);
}
