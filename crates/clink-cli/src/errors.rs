//! Error types for the CLI runtime.

use std::sync::Arc;

use clink::{RequestError, RouterError, TelemetryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read command-line arguments: {0}")]
    Request(#[from] RequestError),
    #[error("failed to register built-in commands: {0}")]
    Registration(#[source] RouterError),
    #[error("{0}")]
    Route(#[source] RouterError),
    #[error("Command \"{0}\" not found.")]
    CommandNotFound(String),
    #[error("{command}: {message}")]
    CommandFailed { command: String, message: String },
}
