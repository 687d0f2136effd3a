//! Subcommand implementations.
//!
//! Each command receives its collaborators explicitly so tests can swap the
//! git and package manager processes for doubles.

use std::io::Write;
use std::path::{Path, PathBuf};

use ris_config::Config;
use ris_plugins::{
    DependencyPlanner, GitPrimitives, InstallOutcome, InstallTask, PackageManager, PluginFinder,
    PluginsCacheStore, ProjectBootstrap, TaskContext, VersionResolver,
};
use tracing::info;

use crate::AppError;
use crate::bootstrap::FileProjectGenerator;
use crate::cli::{AddArgs, NewArgs};
use crate::project_file::ProjectFile;
use crate::registry::load_candidates;

const COMMAND_TARGET: &str = "ris_cli::commands";

fn planner(config: &Config) -> Result<DependencyPlanner, AppError> {
    let finder = PluginFinder::new(config.plugin_git_prefix(), load_candidates(config)?);
    Ok(DependencyPlanner::new(
        finder,
        VersionResolver::new(config.default_plugin_branch()),
        config.plugin_package_prefix(),
    ))
}

fn requested_tasks(planner: &DependencyPlanner, plugins: &[String]) -> Vec<InstallTask> {
    plugins
        .iter()
        .map(|raw| InstallTask::from_spec(&planner.finder().find(raw)))
        .collect()
}

fn refresh_cache(config: &Config, context: &TaskContext) -> Result<(), AppError> {
    let store = PluginsCacheStore::for_project(context.project_path(), config.plugins_cache_path());
    let mut cache = store.read();
    cache.record_installed(context.installed_plugins());
    store.save(&cache)?;
    Ok(())
}

fn report<W: Write>(stdout: &mut W, outcomes: &[InstallOutcome]) -> Result<(), AppError> {
    for outcome in outcomes {
        let written = match outcome {
            InstallOutcome::Installed(plugin) => writeln!(
                stdout,
                "installed {} into {}",
                plugin.name(),
                plugin.path().display()
            ),
            InstallOutcome::AlreadyInstalled { name } => {
                writeln!(stdout, "skipped {name}: {}", ris_plugins::install::ALREADY_INSTALLED)
            }
        };
        written.map_err(AppError::Output)?;
    }
    Ok(())
}

/// Installs plugins into the project at `project_path`.
///
/// The project configuration and the cache are written back even when an
/// installation fails, so a re-run skips the plugins that made it.
pub(crate) fn add<G, W>(
    config: &Config,
    args: &AddArgs,
    project_path: &Path,
    git: &G,
    stdout: &mut W,
) -> Result<(), AppError>
where
    G: GitPrimitives + ?Sized,
    W: Write,
{
    let project_file = ProjectFile::new(project_path, config.configuration_file());
    let configuration = project_file.read()?;
    let planner = planner(config)?;
    let tasks = requested_tasks(&planner, &args.plugins);

    let mut context = TaskContext::new(project_path, configuration);
    if let Some(mode) = args.mode {
        context = context.with_mode(mode.into());
    }

    let installed = planner.install_with_dependencies(tasks, &mut context, git);
    project_file.write(context.configuration())?;
    let cached = refresh_cache(config, &context);

    let outcomes = installed?;
    cached?;
    info!(target: COMMAND_TARGET, count = outcomes.len(), "plugins processed");
    report(stdout, &outcomes)
}

/// Creates a project named by `args` inside `parent_dir`.
pub(crate) fn new_project<G, M, W>(
    config: &Config,
    args: &NewArgs,
    parent_dir: &Path,
    git: &G,
    package_manager: &M,
    stdout: &mut W,
) -> Result<(), AppError>
where
    G: GitPrimitives + ?Sized,
    M: PackageManager + ?Sized,
    W: Write,
{
    let planner = planner(config)?;
    let tasks = requested_tasks(&planner, &args.plugins);
    let generator = FileProjectGenerator::new(config.configuration_file());

    let created = ProjectBootstrap::new(&generator, git, package_manager, &planner).create(
        parent_dir,
        &args.name,
        tasks,
    )?;
    refresh_cache(config, &created.context)?;

    report(stdout, &created.outcomes)?;
    writeln!(
        stdout,
        "created project {} in {}",
        args.name,
        created.context.project_path().display()
    )
    .map_err(AppError::Output)
}

/// Removes the plugins cache of the project at `project_path`.
pub(crate) fn clear_cache<W: Write>(
    config: &Config,
    project_path: &Path,
    stdout: &mut W,
) -> Result<(), AppError> {
    let store = PluginsCacheStore::for_project(project_path, config.plugins_cache_path());
    store.remove()?;
    writeln!(stdout, "removed {}", store.path().display()).map_err(AppError::Output)
}

/// Returns `explicit` made absolute, or the current directory.
pub(crate) fn resolve_project_path(explicit: Option<&PathBuf>) -> Result<PathBuf, AppError> {
    match explicit {
        Some(path) => std::path::absolute(path).map_err(AppError::CurrentDirectory),
        None => std::env::current_dir().map_err(AppError::CurrentDirectory),
    }
}
