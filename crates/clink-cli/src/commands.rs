//! Built-in commands shipped with the `clink` binary.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clink::{
    Command, CommandContext, Inject, Input, Parameter, Printer, ResolveError, Resolver, Router,
    RouterError, Style, TextColor,
};
use unicode_width::UnicodeWidthStr;

/// Name and one-line summary of each built-in command.
pub(crate) const BUILTINS: &[(&str, &str)] = &[
    ("ask-name", "Asks for your name, then greets you"),
    ("confirm", "Asks a yes/no question until it gets an answer"),
    ("greet", "Greets NAME, or the world when no name is given"),
    ("list", "Lists the available commands"),
];

/// Failure reported by a handler while it runs.
///
/// Clones share the same slot, so the runner keeps one clone and hands
/// another to the router.
#[derive(Debug, Clone, Default)]
pub(crate) struct CommandStatus {
    failure: Rc<RefCell<Option<String>>>,
}

impl CommandStatus {
    pub(crate) fn fail(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    /// Records a failed write to the command output.
    pub(crate) fn check_output<T>(&self, result: io::Result<T>) {
        if let Err(error) = result {
            self.fail(format!("failed to write output: {error}"));
        }
    }

    pub(crate) fn take_failure(&self) -> Option<String> {
        self.failure.borrow_mut().take()
    }
}

/// Command names and summaries, rendered as an aligned table.
#[derive(Debug, Clone, Default)]
pub(crate) struct CommandIndex {
    entries: Vec<(String, String)>,
}

impl CommandIndex {
    pub(crate) fn builtins() -> Self {
        Self {
            entries: BUILTINS
                .iter()
                .map(|(name, summary)| ((*name).to_owned(), (*summary).to_owned()))
                .collect(),
        }
    }

    /// Restricts the index to the commands registered on `router`.
    pub(crate) fn registered_on(mut self, router: &Router) -> Self {
        self.entries.retain(|(name, _)| router.contains(name));
        self
    }

    /// One line per command, with summaries aligned by display width.
    pub(crate) fn lines(&self) -> Vec<String> {
        let width = self
            .entries
            .iter()
            .map(|(name, _)| name.width())
            .max()
            .unwrap_or_default();
        self.entries
            .iter()
            .map(|(name, summary)| {
                let padding = " ".repeat(width.saturating_sub(name.width()));
                format!("  {name}{padding}  {summary}")
            })
            .collect()
    }
}

/// Prints a greeting for the first argument.
#[derive(Debug)]
pub(crate) struct Greet {
    context: CommandContext,
    status: Rc<CommandStatus>,
}

impl Command for Greet {
    fn run(&mut self) {
        let name = self.context.argument(0).unwrap_or("World");
        let printed = self
            .context
            .printer()
            .print_line(&format!("Hello, {name}!"), TextColor::Green);
        self.status.check_output(printed);
    }
}

impl Inject for Greet {
    fn parameters() -> Vec<Parameter> {
        let mut parameters = CommandContext::parameters();
        parameters.push(Parameter::value::<CommandStatus>("status"));
        parameters
    }

    fn inject(resolver: &Resolver<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            context: CommandContext::inject(resolver)?,
            status: resolver.value("status")?,
        })
    }
}

/// Prompts for a name and greets it.
#[derive(Debug)]
pub(crate) struct AskName {
    input: Rc<Input>,
    printer: Rc<Printer>,
    status: Rc<CommandStatus>,
}

impl Command for AskName {
    fn run(&mut self) {
        match self
            .input
            .ask_until("What is your name?", |answer| !answer.is_empty())
        {
            Ok(name) => {
                let printed = self
                    .printer
                    .print_line(&format!("Hello, {name}!"), TextColor::Green);
                self.status.check_output(printed);
            }
            Err(error) => self.status.fail(error.to_string()),
        }
    }
}

impl Inject for AskName {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::input("input"),
            Parameter::printer("printer"),
            Parameter::value::<CommandStatus>("status"),
        ]
    }

    fn inject(resolver: &Resolver<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            input: resolver.input("input")?,
            printer: resolver.printer("printer")?,
            status: resolver.value("status")?,
        })
    }
}

/// Asks a yes/no question, repeating it until the answer is valid.
#[derive(Debug)]
pub(crate) struct Confirm {
    context: CommandContext,
    input: Rc<Input>,
    status: Rc<CommandStatus>,
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl Command for Confirm {
    fn run(&mut self) {
        let question = match self.context.request().arguments() {
            [] => String::from("Continue?"),
            words => words.join(" "),
        };
        let prompt = format!("{question} [y/n]");
        let answer = self
            .input
            .ask_until(&prompt, |answer| parse_answer(answer).is_some());

        let printer = self.context.printer();
        match answer.map(|answer| parse_answer(&answer)) {
            Ok(Some(true)) => {
                self.status
                    .check_output(printer.print_line("Confirmed.", TextColor::Green));
            }
            Ok(_) => {
                self.status
                    .check_output(printer.print_line("Cancelled.", TextColor::Yellow));
            }
            Err(error) => self.status.fail(error.to_string()),
        }
    }
}

impl Inject for Confirm {
    fn parameters() -> Vec<Parameter> {
        let mut parameters = CommandContext::parameters();
        parameters.push(Parameter::input("input"));
        parameters.push(Parameter::value::<CommandStatus>("status"));
        parameters
    }

    fn inject(resolver: &Resolver<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            context: CommandContext::inject(resolver)?,
            input: resolver.input("input")?,
            status: resolver.value("status")?,
        })
    }
}

/// Prints the available commands.
#[derive(Debug)]
pub(crate) struct List {
    printer: Rc<Printer>,
    index: Rc<CommandIndex>,
    status: Rc<CommandStatus>,
}

impl List {
    fn print(&self) -> io::Result<()> {
        self.printer
            .print_line("Available commands:", TextColor::Cyan)?;
        for line in self.index.lines() {
            self.printer.print_line(&line, Style::plain())?;
        }
        Ok(())
    }
}

impl Command for List {
    fn run(&mut self) {
        let printed = self.print();
        self.status.check_output(printed);
    }
}

impl Inject for List {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::printer("printer").with_default(),
            Parameter::value::<CommandIndex>("index"),
            Parameter::value::<CommandStatus>("status"),
        ]
    }

    fn inject(resolver: &Resolver<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            printer: resolver.printer_or_stdout(),
            index: resolver.value("index")?,
            status: resolver.value("status")?,
        })
    }
}

/// Builds a router with every built-in command registered.
pub(crate) fn build_router(
    printer: Rc<Printer>,
    input: Rc<Input>,
    status: CommandStatus,
) -> Result<Router, RouterError> {
    let mut router = Router::new();
    router
        .set_printer(printer)
        .set_input(input)
        .set_value(status)
        .set_value(CommandIndex::builtins());

    router
        .register::<AskName>("ask-name")?
        .register::<Confirm>("confirm")?
        .register::<Greet>("greet")?
        .register::<List>("list")?;

    let index = CommandIndex::builtins().registered_on(&router);
    router.set_value(index);
    Ok(router)
}
