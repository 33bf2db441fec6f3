//! Constructor dependency injection for command handlers.
//!
//! Handler types declare their constructor parameters up front (see
//! [`Inject`](crate::Inject)). The [`Validator`] checks those declarations
//! against a [`Repository`] when a command is registered, and the
//! [`Resolver`] feeds repository values to the constructor when the command
//! is routed.

mod parameter;
mod repository;
mod resolver;
mod validator;

pub use parameter::{DependencyKind, Parameter, ValueType};
pub use repository::Repository;
pub use resolver::{ResolveError, Resolver};
pub use validator::Validator;
