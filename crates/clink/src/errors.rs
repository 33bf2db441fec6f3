//! Error types for command registration and routing.
//!
//! Registration errors are raised by [`Router::add_command`] so configuration
//! mistakes surface at startup. Routing an unregistered command is not an
//! error; only a request without a command name is.
//!
//! [`Router::add_command`]: crate::Router::add_command

use thiserror::Error;

use crate::injection::ResolveError;

/// Errors surfaced by the router.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouterError {
    /// The type reference is not in the router's catalog.
    #[error("{type_name} does not exist.")]
    UnknownType { type_name: String },

    /// The type does not implement the command capability.
    #[error("The command type {type_name} must implement \"Command\".")]
    NotAHandler { type_name: String },

    /// A declared constructor parameter cannot be satisfied.
    #[error("{type_name} has invalid constructor parameters.")]
    InvalidConstructor {
        type_name: String,
        /// Names of the parameters that could not be satisfied.
        parameters: Vec<String>,
    },

    /// The request carries no command name.
    #[error("Cannot route request with unset command name.")]
    MissingCommandName,

    /// A validated handler could not be built at dispatch time.
    ///
    /// This means the repository or catalog changed after registration.
    #[error("failed to instantiate {type_name} for command '{command}': {source}")]
    Unresolvable {
        command: String,
        type_name: String,
        #[source]
        source: ResolveError,
    },
}

impl RouterError {
    /// Creates an unknown type error.
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
        }
    }

    /// Creates a missing handler capability error.
    pub fn not_a_handler(type_name: impl Into<String>) -> Self {
        Self::NotAHandler {
            type_name: type_name.into(),
        }
    }

    /// Creates an invalid constructor error.
    pub fn invalid_constructor<I, S>(type_name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidConstructor {
            type_name: type_name.into(),
            parameters: parameters.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a dispatch-time resolution error.
    pub fn unresolvable(
        command: impl Into<String>,
        type_name: impl Into<String>,
        source: ResolveError,
    ) -> Self {
        Self::Unresolvable {
            command: command.into(),
            type_name: type_name.into(),
            source,
        }
    }

    /// Whether the error was raised while registering a command.
    #[must_use]
    pub const fn is_registration_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownType { .. } | Self::NotAHandler { .. } | Self::InvalidConstructor { .. }
        )
    }
}
