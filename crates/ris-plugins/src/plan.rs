//! Installation of plugins together with their plugin dependencies.
//!
//! A plugin's `package.json` may depend on other plugins, recognised by the
//! plugin package scope and matched against the candidate list. Those
//! dependencies are installed after the plugin itself, at the ref resolved
//! from their version expression.

use std::collections::VecDeque;

use tracing::debug;

use crate::context::TaskContext;
use crate::error::PluginError;
use crate::finder::PluginFinder;
use crate::git::GitPrimitives;
use crate::install::{InstallOutcome, InstallTask};
use crate::manifest::PackageManifest;
use crate::version::VersionResolver;

/// Tracing target for dependency planning.
const PLAN_TARGET: &str = "ris_plugins::plan";

/// Turns manifest dependencies into install tasks.
#[derive(Debug, Clone)]
pub struct DependencyPlanner {
    finder: PluginFinder,
    resolver: VersionResolver,
    package_prefix: String,
}

impl DependencyPlanner {
    /// Creates a planner recognising dependencies scoped by `package_prefix`.
    #[must_use]
    pub fn new(
        finder: PluginFinder,
        resolver: VersionResolver,
        package_prefix: impl Into<String>,
    ) -> Self {
        Self {
            finder,
            resolver,
            package_prefix: package_prefix.into(),
        }
    }

    /// Finder used to match dependencies.
    #[must_use]
    pub const fn finder(&self) -> &PluginFinder {
        &self.finder
    }

    /// Install tasks for the plugin dependencies declared by `manifest`.
    ///
    /// Dependencies outside the plugin package scope, or naming no known
    /// candidate, are ignored. Tasks follow the dependency name order.
    #[must_use]
    pub fn dependency_tasks(&self, manifest: &PackageManifest) -> Vec<InstallTask> {
        manifest
            .dependencies()
            .iter()
            .filter(|(name, _)| name.starts_with(&self.package_prefix))
            .filter_map(|(name, version)| {
                let spec = self.finder.lookup(name)?;
                Some(InstallTask::from_spec(spec).with_ref(self.resolver.resolve(version)))
            })
            .collect()
    }

    /// Installs `tasks` in order, then the plugin dependencies of every
    /// plugin freshly installed along the way.
    ///
    /// Already listed plugins are skipped by the install task and contribute
    /// no dependencies, so cyclic dependencies terminate.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing installation; earlier
    /// installations stay in place.
    pub fn install_with_dependencies<G>(
        &self,
        tasks: Vec<InstallTask>,
        context: &mut TaskContext,
        git: &G,
    ) -> Result<Vec<InstallOutcome>, PluginError>
    where
        G: GitPrimitives + ?Sized,
    {
        let mut queue = VecDeque::from(tasks);
        let mut outcomes = Vec::new();

        while let Some(task) = queue.pop_front() {
            let outcome = task.run(context, git)?;
            if let InstallOutcome::Installed(plugin) = &outcome {
                let manifest = PackageManifest::read(plugin.path());
                let dependencies = self.dependency_tasks(&manifest);
                debug!(
                    target: PLAN_TARGET,
                    plugin = %plugin.name(),
                    dependencies = dependencies.len(),
                    "queued plugin dependencies"
                );
                queue.extend(dependencies);
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::configuration::{Configuration, InstallMode};
    use crate::finder::PluginSpec;
    use crate::tests::{GitCall, RecordingGit};

    #[fixture]
    fn planner() -> DependencyPlanner {
        let candidates = vec![
            PluginSpec::new("rispa-core")
                .with_clone_url("https://git.com/x/rispa-core.git")
                .with_package_name("@rispa/core"),
            PluginSpec::new("rispa-server")
                .with_clone_url("https://git.com/x/rispa-server.git")
                .with_package_name("@rispa/server"),
        ];
        DependencyPlanner::new(
            PluginFinder::new("git+", candidates),
            VersionResolver::new("master"),
            "@rispa/",
        )
    }

    fn write_manifest(dir: &Path, manifest: &serde_json::Value) {
        std::fs::create_dir_all(dir).expect("create plugin dir");
        std::fs::write(dir.join("package.json"), manifest.to_string()).expect("write manifest");
    }

    #[rstest]
    fn plans_known_scoped_dependencies_with_resolved_refs(planner: DependencyPlanner) {
        let manifest = PackageManifest::from_value(json!({
            "dependencies": {
                "@rispa/core": "^4.2.1",
                "@rispa/unknown": "1.0.0",
                "react": "16.0.0",
            },
            "devDependencies": { "@rispa/server": "*" },
        }));

        let tasks = planner.dependency_tasks(&manifest);

        let summary: Vec<(&str, Option<&str>)> = tasks
            .iter()
            .map(|task| (task.name(), task.git_ref()))
            .collect();
        assert_eq!(
            summary,
            [
                ("rispa-core", Some("v4.2.1")),
                ("rispa-server", Some("master")),
            ]
        );
    }

    #[rstest]
    fn unscoped_alias_is_not_a_plugin_dependency() {
        let planner = DependencyPlanner::new(
            PluginFinder::new(
                "git+",
                vec![PluginSpec::new("rispa-core").with_package_alias("core")],
            ),
            VersionResolver::new("master"),
            "@rispa/",
        );
        let manifest = PackageManifest::from_value(json!({ "dependencies": { "core": "1.0.0" } }));
        assert!(planner.dependency_tasks(&manifest).is_empty());
    }

    #[rstest]
    fn dependencies_of_installed_plugins_are_installed_next(planner: DependencyPlanner) {
        let project = tempfile::tempdir().expect("create temp dir");
        let packages = project.path().join("packages");
        write_manifest(
            &packages.join("rispa-server"),
            &json!({ "dependencies": { "@rispa/core": "1.0.0", "@rispa/server": "1.0.0" } }),
        );
        let mut context = TaskContext::new(
            project.path(),
            Configuration::new("./packages", InstallMode::Development),
        );
        let git = RecordingGit::default();

        let outcomes = planner
            .install_with_dependencies(
                vec![InstallTask::new("rispa-server")
                    .with_clone_url("https://git.com/x/rispa-server.git")],
                &mut context,
                &git,
            )
            .expect("install");

        let names: Vec<&str> = outcomes.iter().map(InstallOutcome::name).collect();
        assert_eq!(names, ["rispa-server", "rispa-core", "rispa-server"]);
        assert!(outcomes.last().is_some_and(InstallOutcome::is_skipped));
        assert_eq!(
            context.configuration().plugins(),
            ["rispa-server", "rispa-core"]
        );
        assert!(matches!(
            git.calls().get(1),
            Some(GitCall::Clone { git_ref: Some(git_ref), .. }) if git_ref == "v1.0.0"
        ));
    }
}
