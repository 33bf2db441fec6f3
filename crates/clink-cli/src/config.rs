//! Configuration loading helpers for the clink CLI.
//!
//! Leading configuration flags are separated from the command tokens so
//! `ortho_config` only sees the flags it understands while the router receives
//! the command name and its arguments untouched.

use std::ffi::{OsStr, OsString};

use clink_config::Config;

use crate::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`clink_config::Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] =
    &["--config-path", "--log-filter", "--log-format", "--color"];

pub(crate) trait ConfigLoader {
    /// Loads configuration for the CLI.
    ///
    /// Configuration flags must appear before the command name. Flags after
    /// it are passed to the command as ordinary arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_args(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

fn classify_flag(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Stop;
    }

    let (flag, has_inline_value) = match text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (&*text, false),
    };

    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !has_inline_value,
        }
    } else {
        FlagAction::Stop
    }
}

#[derive(Debug)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(program) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut command_start = 1;
    let mut pending_value = false;

    for argument in args.iter().skip(1) {
        if pending_value {
            pending_value = false;
        } else {
            match classify_flag(argument) {
                FlagAction::Include { needs_value } => pending_value = needs_value,
                FlagAction::Stop => break,
            }
        }
        config_arguments.push(argument.clone());
        command_start += 1;
    }

    ConfigArgumentSplit {
        config_arguments,
        command_start,
    }
}

/// Program name followed by the command tokens.
pub(crate) fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[rstest]
    #[case::inline("--log-filter=debug", Some(false))]
    #[case::separate("--log-filter", Some(true))]
    #[case::colour("--color", Some(true))]
    #[case::command("greet", None)]
    #[case::unknown_flag("--unknown", None)]
    fn classifies_flags(#[case] argument: &str, #[case] expected: Option<bool>) {
        let action = classify_flag(OsStr::new(argument));
        match (action, expected) {
            (FlagAction::Include { needs_value }, Some(expected)) => {
                assert_eq!(needs_value, expected);
            }
            (FlagAction::Stop, None) => {}
            (action, expected) => panic!("unexpected {action:?} for {expected:?}"),
        }
    }

    #[rstest]
    #[case::empty(&[], &[], 0)]
    #[case::program_only(&["clink"], &["clink"], 1)]
    #[case::command_only(&["clink", "greet", "John"], &["clink"], 1)]
    #[case::separate_value(
        &["clink", "--log-filter", "debug", "greet"],
        &["clink", "--log-filter", "debug"],
        3
    )]
    #[case::inline_value(
        &["clink", "--color=never", "greet", "--log-filter=info"],
        &["clink", "--color=never"],
        2
    )]
    #[case::flags_only(&["clink", "--log-format", "json"], &["clink", "--log-format", "json"], 3)]
    fn splits_leading_configuration_flags(
        #[case] args: &[&str],
        #[case] expected_config: &[&str],
        #[case] expected_start: usize,
    ) {
        let args = os_args(args);
        let split = split_config_arguments(&args);
        assert_eq!(split.config_arguments, os_args(expected_config));
        assert_eq!(split.command_start, expected_start);
    }

    #[test]
    fn loader_falls_back_to_defaults_without_any_source() {
        let config = OrthoConfigLoader
            .load(&os_args(&["clink"]))
            .expect("defaults should load");
        assert_eq!(config.log_filter(), clink_config::DEFAULT_LOG_FILTER);
        assert_eq!(config.color(), clink_config::default_color_mode());
    }

    #[test]
    fn prepared_arguments_keep_program_and_command_tokens() {
        let args = os_args(&["clink", "--color", "never", "greet", "--color"]);
        let split = split_config_arguments(&args);
        let prepared = prepare_cli_arguments(&args, &split);
        assert_eq!(prepared, os_args(&["clink", "greet", "--color"]));
    }
}
