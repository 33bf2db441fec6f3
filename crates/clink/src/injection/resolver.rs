//! Hands repository values to constructor functions.

use std::any::{Any, type_name};
use std::rc::Rc;

use thiserror::Error;

use super::parameter::ValueType;
use super::repository::Repository;
use crate::input::Input;
use crate::printer::Printer;
use crate::request::Request;

/// Errors raised while resolving constructor parameters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No value was registered for the parameter.
    #[error("no value registered for parameter '{parameter}' ({kind})")]
    Missing {
        /// Parameter name.
        parameter: String,
        /// Requested dependency, as text.
        kind: String,
    },
    /// A value was registered under the parameter name with another type.
    #[error("value for parameter '{parameter}' is not a {expected}")]
    TypeMismatch {
        /// Parameter name.
        parameter: String,
        /// Type the constructor asked for.
        expected: &'static str,
    },
    /// The type has no constructor function.
    #[error("{type_name} cannot be instantiated as a command")]
    NotInstantiable {
        /// Type reference that was looked up.
        type_name: String,
    },
}

impl ResolveError {
    fn missing(parameter: &str, kind: impl Into<String>) -> Self {
        Self::Missing {
            parameter: parameter.to_owned(),
            kind: kind.into(),
        }
    }
}

/// Read access to a [`Repository`] for constructor functions.
///
/// Every accessor takes the parameter name so failures point at the
/// declaration that could not be satisfied.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    repository: &'a Repository,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over `repository`.
    #[must_use]
    pub const fn new(repository: &'a Repository) -> Self {
        Self { repository }
    }

    /// The routed request.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Missing`] when no request has been injected.
    pub fn request(&self, parameter: &str) -> Result<Rc<dyn Request>, ResolveError> {
        self.repository
            .request()
            .ok_or_else(|| ResolveError::missing(parameter, "request"))
    }

    /// The shared input reader.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Missing`] when no input is registered.
    pub fn input(&self, parameter: &str) -> Result<Rc<Input>, ResolveError> {
        self.repository
            .input()
            .ok_or_else(|| ResolveError::missing(parameter, "input"))
    }

    /// The shared printer.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Missing`] when no printer is registered.
    pub fn printer(&self, parameter: &str) -> Result<Rc<Printer>, ResolveError> {
        self.repository
            .printer()
            .ok_or_else(|| ResolveError::missing(parameter, "printer"))
    }

    /// The shared printer, or a stdout printer when none is registered.
    #[must_use]
    pub fn printer_or_stdout(&self) -> Rc<Printer> {
        self.repository
            .printer()
            .unwrap_or_else(|| Rc::new(Printer::stdout()))
    }

    /// An extra value, looked up by type first and by parameter name second.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Missing`] when neither key holds a value and
    /// [`ResolveError::TypeMismatch`] when the named value has another type.
    pub fn value<T: Any>(&self, parameter: &str) -> Result<Rc<T>, ResolveError> {
        match self.lookup::<T>(parameter)? {
            Some(value) => Ok(value),
            None => Err(ResolveError::missing(parameter, ValueType::of::<T>().name())),
        }
    }

    /// An extra value, or `default` when nothing is registered for it.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::TypeMismatch`] when a value exists under the
    /// parameter name with another type.
    pub fn value_or_else<T, F>(&self, parameter: &str, default: F) -> Result<Rc<T>, ResolveError>
    where
        T: Any,
        F: FnOnce() -> T,
    {
        Ok(self
            .lookup::<T>(parameter)?
            .unwrap_or_else(|| Rc::new(default())))
    }

    fn lookup<T: Any>(&self, parameter: &str) -> Result<Option<Rc<T>>, ResolveError> {
        if let Some(value) = self
            .repository
            .value_by_type(ValueType::of::<T>().id())
            .and_then(|value| value.downcast::<T>().ok())
        {
            return Ok(Some(value));
        }

        match self.repository.value_by_name(parameter) {
            Some(value) => value
                .downcast::<T>()
                .map(Some)
                .map_err(|_| ResolveError::TypeMismatch {
                    parameter: parameter.to_owned(),
                    expected: type_name::<T>(),
                }),
            None => Ok(None),
        }
    }
}
