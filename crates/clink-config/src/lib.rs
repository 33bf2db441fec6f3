//! Layered configuration shared by the clink library and binary.
//!
//! Values are merged from built-in defaults, an optional TOML file, `CLINK_*`
//! environment variables and command-line flags, in increasing order of
//! precedence. The built-in defaults in [`defaults`] form the lowest layer,
//! so every field is always populated.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

mod color;
pub mod defaults;
mod logging;

pub use color::{ColorMode, ColorModeParseError};
pub use defaults::{
    DEFAULT_LOG_FILTER, default_color_mode, default_log_filter, default_log_filter_string,
    default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for the clink runtime.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, OrthoConfig)]
#[ortho_config(prefix = "CLINK")]
pub struct Config {
    /// Tracing filter expression, for example `clink=debug`.
    #[ortho_config(default = defaults::default_log_filter_string())]
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = defaults::default_log_format())]
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
    /// Colour behaviour for printed output.
    #[ortho_config(default = defaults::default_color_mode())]
    #[serde(default = "defaults::default_color_mode")]
    pub color: ColorMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            color: default_color_mode(),
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when a source is malformed.
    pub fn load_from_env() -> Result<Self, Arc<OrthoError>> {
        Self::load()
    }

    /// Loads configuration from an explicit argument list.
    ///
    /// The first element is treated as the program name, as with
    /// [`std::env::args_os`].
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when a source is malformed.
    pub fn load_from_args<I>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args)
    }

    /// Tracing filter expression to install.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Format used for log records.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Requested colour behaviour.
    #[must_use]
    pub const fn color(&self) -> ColorMode {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_builtin_defaults() {
        let config = Config::default();
        assert_eq!(config.log_filter(), "warn");
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.color(), ColorMode::Auto);
    }

    #[test]
    fn explicit_values_take_priority() {
        let config = Config {
            log_filter: String::from("clink=debug"),
            log_format: LogFormat::Json,
            color: ColorMode::Never,
        };
        assert_eq!(config.log_filter(), "clink=debug");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.color(), ColorMode::Never);
    }
}
