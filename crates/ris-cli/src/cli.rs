//! CLI argument definitions for `ris`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ris_plugins::InstallMode;

/// Command-line interface of the `ris` plugin manager.
#[derive(Parser, Debug)]
#[command(name = "ris", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The operation to perform.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Installs plugins into an existing project.
    Add(AddArgs),
    /// Creates a new project with an initial set of plugins.
    New(NewArgs),
    /// Manages the plugins cache.
    Cache {
        /// The cache action to perform.
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Arguments of `ris add`.
#[derive(Args, Debug, Clone)]
pub(crate) struct AddArgs {
    /// Plugin names, package names, aliases or `git+` URLs.
    #[arg(value_name = "PLUGIN", required = true)]
    pub(crate) plugins: Vec<String>,
    /// Overrides the install mode recorded in the project configuration.
    #[arg(long, value_enum)]
    pub(crate) mode: Option<ModeArg>,
    /// Project root; defaults to the current directory.
    #[arg(long, value_name = "PATH")]
    pub(crate) project_path: Option<PathBuf>,
}

/// Arguments of `ris new`.
#[derive(Args, Debug, Clone)]
pub(crate) struct NewArgs {
    /// Name of the project directory to create.
    #[arg(value_name = "NAME")]
    pub(crate) name: String,
    /// Plugins to install into the new project.
    #[arg(long = "plugin", value_name = "PLUGIN")]
    pub(crate) plugins: Vec<String>,
    /// Installs dependencies with yarn instead of the configured manager.
    #[arg(long)]
    pub(crate) yarn: bool,
}

/// Plugins cache actions.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CacheAction {
    /// Deletes the plugins cache file.
    Clear {
        /// Project root; defaults to the current directory.
        #[arg(long, value_name = "PATH")]
        project_path: Option<PathBuf>,
    },
}

/// Install mode accepted on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum ModeArg {
    /// Editable clones under the plugins directory.
    Development,
    /// Subtrees merged into the project history.
    Production,
}

impl From<ModeArg> for InstallMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Development => Self::Development,
            ModeArg::Production => Self::Production,
        }
    }
}
