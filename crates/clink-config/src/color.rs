//! Colour selection for terminal output.
//!
//! The printer emits ANSI escape sequences only when the resolved mode says so.
//! `Auto` defers the decision to the caller, which knows whether stdout is a
//! terminal.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Requested colour behaviour for printed output.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ColorMode {
    /// Colour when stdout is a terminal, plain text otherwise.
    #[default]
    Auto,
    /// Always emit ANSI escape sequences.
    Always,
    /// Never emit ANSI escape sequences.
    Never,
}

impl ColorMode {
    /// Resolves the mode against the terminal status of the output stream.
    #[must_use]
    pub const fn resolve(self, is_terminal: bool) -> bool {
        match self {
            Self::Auto => is_terminal,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Errors encountered while parsing a [`ColorMode`] from text.
pub type ColorModeParseError = strum::ParseError;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::auto_terminal(ColorMode::Auto, true, true)]
    #[case::auto_redirected(ColorMode::Auto, false, false)]
    #[case::always(ColorMode::Always, false, true)]
    #[case::never(ColorMode::Never, true, false)]
    fn resolves_against_terminal(
        #[case] mode: ColorMode,
        #[case] is_terminal: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(mode.resolve(is_terminal), expected);
    }

    #[rstest]
    #[case("auto", ColorMode::Auto)]
    #[case("ALWAYS", ColorMode::Always)]
    #[case("Never", ColorMode::Never)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: ColorMode) {
        assert_eq!(ColorMode::from_str(input).expect("parse colour mode"), expected);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(ColorMode::from_str("sometimes").is_err());
    }
}
