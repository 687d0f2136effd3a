//! Command-line runtime of the `ris` plugin manager.
//!
//! The runtime splits leading configuration flags from the subcommand, loads
//! [`ris_config::Config`] through `ortho_config`, installs the tracing
//! subscriber and dispatches to the plugin operations. Output streams and the
//! configuration loader are injectable for tests.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use ris_config::Config;
use ris_plugins::GitCli;

mod bootstrap;
mod cli;
mod commands;
mod config;
mod errors;
mod project_file;
mod registry;
mod telemetry;

use bootstrap::SelectedPackageManager;
use cli::{CacheAction, Cli, CliCommand};
use config::split_config_arguments;
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    stdout: &'a mut W,
    stderr: &'a mut E,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(stdout: &'a mut W, stderr: &'a mut E, loader: &'a L) -> Self {
        Self {
            stdout,
            stderr,
            loader,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let result = Cli::try_parse_from(&split.command_arguments)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.loader
                    .load(&split.config_arguments)
                    .map(|config| (cli, config))
            })
            .and_then(|(cli, config)| {
                telemetry::initialise(&config)?;
                self.dispatch(cli.command, &config)
            });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                let _ = write!(self.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    fn dispatch(&mut self, command: CliCommand, config: &Config) -> Result<(), AppError> {
        let git = GitCli::new(config.default_plugin_branch());
        match command {
            CliCommand::Add(args) => {
                let project_path = commands::resolve_project_path(args.project_path.as_ref())?;
                commands::add(config, &args, &project_path, &git, &mut *self.stdout)
            }
            CliCommand::New(args) => {
                let parent_dir = commands::resolve_project_path(None)?;
                let package_manager =
                    SelectedPackageManager::new(args.yarn, config.package_manager().program());
                commands::new_project(
                    config,
                    &args,
                    &parent_dir,
                    &git,
                    &package_manager,
                    &mut *self.stdout,
                )
            }
            CliCommand::Cache {
                action: CacheAction::Clear {
                    project_path: explicit,
                },
            } => {
                let project_path = commands::resolve_project_path(explicit.as_ref())?;
                commands::clear_cache(config, &project_path, &mut *self.stdout)
            }
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(stdout, stderr, loader).run(args)
}

#[cfg(test)]
mod tests;
