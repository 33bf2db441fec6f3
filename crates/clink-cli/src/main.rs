//! CLI entrypoint for the clink command router.
//!
//! The binary delegates to [`clink_cli::run`], which loads configuration,
//! installs logging and routes the command named on the command line.

use std::io::{self, IsTerminal, StderrLock};
use std::process::ExitCode;

use clink_cli::IoStreams;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    let io = IoStreams::new(io::stdin().lock(), io::stdout(), &mut stderr)
        .with_terminal_status(stdout_is_terminal);
    clink_cli::run(std::env::args_os(), io)
}
