//! Name-based command routing for command-line applications.
//!
//! A [`Router`] maps command names to handler types. Each handler declares
//! the dependencies its constructor needs through [`Inject`]; the router
//! checks those declarations against its dependency [`Repository`] when the
//! command is registered, so misconfigured handlers fail at startup rather
//! than on first use. Routing a [`Request`] then injects the request itself
//! and builds a fresh handler, ready to [`Command::run`].
//!
//! Handlers are usually registered with [`Router::register`], which the
//! compiler checks. [`Router::add_command`] accepts a type reference by name
//! and resolves it through the router's [`TypeCatalog`].
//!
//! The [`Printer`] and [`Input`] collaborators cover coloured terminal output
//! and line-based prompts, and [`telemetry`] installs structured logging from
//! a [`clink_config::Config`].

mod catalog;
mod command;
mod errors;
mod injection;
mod input;
mod printer;
mod request;
mod router;
pub mod telemetry;

pub use catalog::{Factory, TypeCatalog, TypeDescriptor};
pub use command::{Command, CommandContext, Inject};
pub use errors::RouterError;
pub use injection::{DependencyKind, Parameter, Repository, ResolveError, Resolver, ValueType, Validator};
pub use input::{Input, InputError};
pub use printer::{BgColor, Printer, SharedBuffer, Style, TextColor, paint};
pub use request::{IncomingRequest, OutgoingRequest, Request, RequestError};
pub use router::Router;
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
