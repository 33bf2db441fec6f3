//! Handler capability and constructor declarations.

use std::any::Any;
use std::rc::Rc;

use crate::injection::{Parameter, ResolveError, Resolver};
use crate::printer::Printer;
use crate::request::Request;

/// A unit of behaviour invoked by name.
pub trait Command: Any {
    /// Executes the command.
    fn run(&mut self);
}

impl dyn Command {
    /// Whether the handler is a `T`.
    #[must_use]
    pub fn is<T: Command>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Borrows the handler as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Command>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Mutably borrows the handler as a `T`.
    #[must_use]
    pub fn downcast_mut<T: Command>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

/// Types built from injected dependencies.
///
/// `parameters` is the static declaration the router validates at
/// registration time. `inject` must only ask the resolver for parameters it
/// declared.
pub trait Inject: Sized {
    /// Declared constructor parameters, in order.
    fn parameters() -> Vec<Parameter>;

    /// Builds the value from resolved dependencies.
    ///
    /// # Errors
    ///
    /// Propagates the resolver error for the first unsatisfied parameter.
    fn inject(resolver: &Resolver<'_>) -> Result<Self, ResolveError>;
}

/// Request and printer bundle most commands start from.
///
/// Embed it in a command and delegate [`Inject`] to it. The printer falls
/// back to stdout when the router has none registered.
#[derive(Clone)]
pub struct CommandContext {
    request: Rc<dyn Request>,
    printer: Rc<Printer>,
}

impl CommandContext {
    /// Creates a context from explicit parts.
    pub fn new(request: Rc<dyn Request>, printer: Rc<Printer>) -> Self {
        Self { request, printer }
    }

    /// Request being handled.
    #[must_use]
    pub fn request(&self) -> &dyn Request {
        self.request.as_ref()
    }

    /// Printer for command output.
    #[must_use]
    pub fn printer(&self) -> &Printer {
        &self.printer
    }

    /// Positional argument at `index`, if any.
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&str> {
        self.request.arguments().get(index).map(String::as_str)
    }
}

impl Inject for CommandContext {
    fn parameters() -> Vec<Parameter> {
        vec![
            Parameter::request("request"),
            Parameter::printer("printer").with_default(),
        ]
    }

    fn inject(resolver: &Resolver<'_>) -> Result<Self, ResolveError> {
        Ok(Self {
            request: resolver.request("request")?,
            printer: resolver.printer_or_stdout(),
        })
    }
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("command", &self.request.command())
            .field("arguments", &self.request.arguments())
            .field("printer", &self.printer)
            .finish()
    }
}
