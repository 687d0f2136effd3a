//! Unit tests for the shared task context.

use std::path::{Path, PathBuf};

use rstest::{fixture, rstest};

use super::*;

#[fixture]
fn context() -> TaskContext {
    TaskContext::new(
        "/work/project",
        Configuration::new("./packages", InstallMode::Development),
    )
}

#[rstest]
fn plugins_path_joins_configured_relative_path(context: TaskContext) {
    assert_eq!(
        context.resolve_plugins_path(),
        PathBuf::from("/work/project/packages")
    );
}

#[rstest]
fn plugins_path_override_wins(context: TaskContext) {
    let overridden = context.with_plugins_path("/elsewhere/plugins");
    assert_eq!(
        overridden.resolve_plugins_path(),
        PathBuf::from("/elsewhere/plugins")
    );
}

#[rstest]
fn mode_falls_back_to_configuration(context: TaskContext) {
    assert_eq!(context.resolve_mode(), InstallMode::Development);
    let overridden = context.with_mode(InstallMode::Production);
    assert_eq!(overridden.resolve_mode(), InstallMode::Production);
}

#[rstest]
fn installed_history_starts_empty_and_initialises_lazily(mut context: TaskContext) {
    assert!(context.installed_plugins().is_empty());
    context.installed_plugins_mut().push(InstalledPlugin::new(
        "rispa-core",
        "/work/project/packages/rispa-core",
        "https://git.com/x/rispa-core.git",
        Some("v1.0.0".into()),
    ));

    let installed = context.installed_plugins();
    assert_eq!(installed.len(), 1);
    assert_eq!(installed[0].name(), "rispa-core");
    assert_eq!(
        installed[0].path(),
        Path::new("/work/project/packages/rispa-core")
    );
    assert_eq!(installed[0].git_ref(), Some("v1.0.0"));
}

#[rstest]
fn remembered_plugins_path_is_reused(mut context: TaskContext) {
    context.remember_plugins_path(PathBuf::from("/cached/plugins"));
    assert_eq!(
        context.resolve_plugins_path(),
        PathBuf::from("/cached/plugins")
    );
}

#[test]
fn installed_plugin_serialises_ref_key() {
    let plugin = InstalledPlugin::new(
        "rispa-core",
        "/p/rispa-core",
        "https://git.com/x/rispa-core.git",
        Some("master".into()),
    );
    let json = serde_json::to_value(&plugin).expect("serialise plugin");
    assert_eq!(
        json,
        serde_json::json!({
            "name": "rispa-core",
            "path": "/p/rispa-core",
            "cloneUrl": "https://git.com/x/rispa-core.git",
            "ref": "master",
        })
    );
}
