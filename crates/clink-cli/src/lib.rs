//! Command-line runtime for the `clink` binary.
//!
//! The runtime splits configuration flags from the command tokens, loads the
//! configuration, installs logging and routes the request to one of the
//! built-in commands. IO streams and the configuration loader can be
//! substituted so tests drive the whole pipeline in memory.

use std::ffi::OsString;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use clink::{IncomingRequest, Input, Printer, Request, telemetry};
use tracing::debug;

mod cli;
mod commands;
mod config;
mod errors;

use cli::Cli;
use commands::{CommandIndex, CommandStatus, build_router};
use config::{prepare_cli_arguments, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
pub(crate) use errors::AppError;

const CLI_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::runner");

/// Bundles the IO streams provided to the CLI runtime.
///
/// Stdin and stdout are owned because the router shares them with command
/// handlers for the rest of the process; stderr is only written by the
/// runner itself.
pub struct IoStreams<'a, E: Write> {
    stdin: Box<dyn BufRead>,
    stdout: Box<dyn Write>,
    stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, E: Write> IoStreams<'a, E> {
    /// Wraps the given streams, detecting whether stdout is a terminal.
    pub fn new(
        stdin: impl BufRead + 'static,
        stdout: impl Write + 'static,
        stderr: &'a mut E,
    ) -> Self {
        Self {
            stdin: Box::new(stdin),
            stdout: Box::new(stdout),
            stderr,
            stdout_is_terminal: io::stdout().is_terminal(),
        }
    }

    /// Overrides terminal detection for stdout.
    #[must_use]
    pub fn with_terminal_status(mut self, stdout_is_terminal: bool) -> Self {
        self.stdout_is_terminal = stdout_is_terminal;
        self
    }
}

struct CliRunner<'a, E: Write, L: ConfigLoader> {
    io: IoStreams<'a, E>,
    loader: &'a L,
}

impl<'a, E, L> CliRunner<'a, E, L>
where
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: IoStreams<'a, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let IoStreams {
            stdin,
            mut stdout,
            stderr,
            stdout_is_terminal,
        } = self.io;

        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let cli = match Cli::try_parse_from(&cli_arguments) {
            Ok(cli) => cli,
            // `--help` and `--version` surface as errors that belong on stdout.
            Err(error) if !error.use_stderr() => {
                let _ = write!(stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => return report(stderr, &AppError::CliUsage(error)),
        };

        if cli.is_bare_invocation() {
            let _ = write_bare_usage(stderr);
            return ExitCode::FAILURE;
        }

        let result = self
            .loader
            .load(&split.config_arguments)
            .and_then(|config| {
                telemetry::initialise(&config)?;
                debug!(
                    target: CLI_TARGET,
                    command = cli.command.as_deref(),
                    arguments = cli.arguments.len(),
                    log_format = %config.log_format(),
                    "configuration loaded"
                );

                let ansi = config.color().resolve(stdout_is_terminal);
                let printer = Rc::new(Printer::with_writer(stdout).with_ansi(ansi));
                let input = Rc::new(Input::new(stdin, Rc::clone(&printer)));
                let request = IncomingRequest::from_args(cli_arguments)?;
                dispatch(request, printer, input)
            });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => report(stderr, &error),
        }
    }
}

fn report<E: Write>(stderr: &mut E, error: &AppError) -> ExitCode {
    let _ = writeln!(stderr, "{error}");
    ExitCode::FAILURE
}

fn dispatch(
    request: IncomingRequest,
    printer: Rc<Printer>,
    input: Rc<Input>,
) -> Result<(), AppError> {
    let status = CommandStatus::default();
    let mut router =
        build_router(printer, input, status.clone()).map_err(AppError::Registration)?;

    let command = request.command().unwrap_or_default().to_owned();
    let mut handler = router
        .route(request)
        .map_err(AppError::Route)?
        .ok_or_else(|| AppError::CommandNotFound(command.clone()))?;

    debug!(target: CLI_TARGET, command = command.as_str(), "running command");
    handler.run();

    match status.take_failure() {
        Some(message) => Err(AppError::CommandFailed { command, message }),
        None => Ok(()),
    }
}

/// Writes usage and the command list for an invocation without a command.
fn write_bare_usage<E: Write>(stderr: &mut E) -> io::Result<()> {
    writeln!(stderr, "Usage: clink [OPTIONS] <COMMAND> [ARG]...")?;
    writeln!(stderr)?;
    writeln!(stderr, "Commands:")?;
    for line in CommandIndex::builtins().lines() {
        writeln!(stderr, "{line}")?;
    }
    writeln!(stderr)?;
    writeln!(stderr, "Run 'clink --help' for more information.")
}

/// Runs the CLI using the provided arguments and IO streams.
#[must_use]
pub fn run<I, E>(args: I, io: IoStreams<'_, E>) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    E: Write,
{
    run_with_loader(args, io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<I, E, L>(args: I, io: IoStreams<'_, E>, loader: &L) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}
