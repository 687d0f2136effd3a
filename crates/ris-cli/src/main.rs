//! CLI entrypoint for the `ris` plugin manager.
//!
//! The binary delegates to [`ris_cli::run`], which loads configuration,
//! parses the subcommand and drives plugin installation.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    ris_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
