//! Command-line argument definitions for the `clink` binary.
//!
//! Configuration flags are split off before parsing (see `config.rs`), so
//! this parser only sees the program name and the command tokens.

use clap::Parser;

/// Runs a named clink command.
#[derive(Parser, Debug)]
#[command(
    name = "clink",
    version,
    disable_help_subcommand = true,
    after_help = "Configuration flags (--config-path, --log-filter, --log-format, --color) \
                  must come before COMMAND."
)]
pub(crate) struct Cli {
    /// The command to run (for example `greet`).
    #[arg(value_name = "COMMAND")]
    pub(crate) command: Option<String>,
    /// Arguments passed to the command.
    #[arg(
        value_name = "ARG",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) arguments: Vec<String>,
}

impl Cli {
    /// Returns true when no command was supplied.
    pub(crate) const fn is_bare_invocation(&self) -> bool {
        self.command.is_none()
    }
}
