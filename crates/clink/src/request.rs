//! Invocation requests handed to the router.
//!
//! A request carries the program name, the command name and the positional
//! arguments of one invocation. [`IncomingRequest`] is parsed from a process
//! argument vector; [`OutgoingRequest`] is assembled in code, for example to
//! dispatch a nested command or to drive a handler from a test.

use std::ffi::OsString;

use thiserror::Error;

/// Read-only view of one command invocation.
pub trait Request {
    /// Name the program was invoked as, when known.
    fn program_name(&self) -> Option<&str>;

    /// Command name used for routing, when one was supplied.
    fn command(&self) -> Option<&str>;

    /// Positional arguments following the command name.
    fn arguments(&self) -> &[String];
}

/// Errors raised while building a request from raw arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// An argument was not valid UTF-8.
    #[error("argument {index} is not valid UTF-8")]
    NonUtf8Argument {
        /// Position of the offending element in the argument vector.
        index: usize,
    },
}

/// Request parsed from a process argument vector.
///
/// The first element is the program name, the second the command name and
/// the remainder the command arguments. Missing elements leave the
/// corresponding fields unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    program_name: Option<String>,
    command: Option<String>,
    arguments: Vec<String>,
}

impl IncomingRequest {
    /// Parses a request from an argument vector.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NonUtf8Argument`] when an element cannot be
    /// represented as a Rust string.
    pub fn from_args<I, A>(args: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let values = args
            .into_iter()
            .enumerate()
            .map(|(index, argument)| {
                argument
                    .into()
                    .into_string()
                    .map_err(|_| RequestError::NonUtf8Argument { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = values.into_iter();
        Ok(Self {
            program_name: values.next(),
            command: values.next(),
            arguments: values.collect(),
        })
    }

    /// Parses the arguments of the running process.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::NonUtf8Argument`] when an argument is not
    /// valid UTF-8.
    pub fn from_env() -> Result<Self, RequestError> {
        Self::from_args(std::env::args_os())
    }
}

impl Request for IncomingRequest {
    fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

/// Request assembled in code before being routed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingRequest {
    program_name: Option<String>,
    command: Option<String>,
    arguments: Vec<String>,
}

impl OutgoingRequest {
    /// Creates an empty request with no command and no arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command name.
    pub fn set_command(&mut self, command: impl Into<String>) -> &mut Self {
        self.command = Some(command.into());
        self
    }

    /// Replaces the positional arguments.
    pub fn set_arguments<I, S>(&mut self, arguments: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the program name reported to handlers.
    pub fn set_program_name(&mut self, program_name: impl Into<String>) -> &mut Self {
        self.program_name = Some(program_name.into());
        self
    }

    /// Returns the request with the given command name.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.set_command(command);
        self
    }

    /// Returns the request with the given positional arguments.
    #[must_use]
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_arguments(arguments);
        self
    }
}

impl Request for OutgoingRequest {
    fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    fn arguments(&self) -> &[String] {
        &self.arguments
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty(&[], None, None, &[])]
    #[case::program_only(&["clink"], Some("clink"), None, &[])]
    #[case::command(&["clink", "just-do"], Some("clink"), Some("just-do"), &[])]
    #[case::one_argument(&["clink", "just-do", "it"], Some("clink"), Some("just-do"), &["it"])]
    #[case::two_arguments(
        &["clink", "just-do", "it", "now"],
        Some("clink"),
        Some("just-do"),
        &["it", "now"]
    )]
    fn splits_argument_vector(
        #[case] raw: &[&str],
        #[case] program_name: Option<&str>,
        #[case] command: Option<&str>,
        #[case] arguments: &[&str],
    ) {
        let request = IncomingRequest::from_args(raw.iter().copied()).expect("parse request");
        assert_eq!(request.program_name(), program_name);
        assert_eq!(request.command(), command);
        assert_eq!(request.arguments(), arguments);
    }

    #[cfg(unix)]
    #[test]
    fn rejects_non_utf8_arguments() {
        use std::os::unix::ffi::OsStringExt;

        let raw = vec![
            OsString::from("clink"),
            OsString::from("greet"),
            OsString::from_vec(vec![0xff, 0xfe]),
        ];
        let error = IncomingRequest::from_args(raw).expect_err("non-UTF-8 must fail");
        assert_eq!(error, RequestError::NonUtf8Argument { index: 2 });
    }

    #[test]
    fn outgoing_request_starts_empty() {
        let request = OutgoingRequest::new();
        assert_eq!(request.command(), None);
        assert_eq!(request.program_name(), None);
        assert!(request.arguments().is_empty());
    }

    #[test]
    fn outgoing_request_stages_command_and_arguments() {
        let mut request = OutgoingRequest::new();
        request
            .set_command("do-something")
            .set_arguments(["arg1", "arg2", "arg3"])
            .set_program_name("clink");
        assert_eq!(request.command(), Some("do-something"));
        assert_eq!(request.arguments(), ["arg1", "arg2", "arg3"]);
        assert_eq!(request.program_name(), Some("clink"));
    }

    #[test]
    fn later_arguments_replace_earlier_ones() {
        let request = OutgoingRequest::new()
            .with_arguments(["first"])
            .with_arguments(["second", "third"]);
        assert_eq!(request.arguments(), ["second", "third"]);
    }
}
