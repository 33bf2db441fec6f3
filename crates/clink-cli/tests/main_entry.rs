//! Integration tests for the `clink` binary entry point.
//!
//! Covers routing of the built-in commands and user-facing error handling
//! for unknown commands and malformed configuration.

use std::fs;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

fn clink() -> Command {
    let mut command = cargo_bin_cmd!("clink");
    command
        .env_remove("CLINK_LOG_FILTER")
        .env_remove("CLINK_LOG_FORMAT")
        .env_remove("CLINK_COLOR");
    command
}

#[test]
fn greet_prints_the_given_name() {
    let mut command = clink();
    command.args(["greet", "John"]);
    command.assert().success().stdout("Hello, John!\n");
}

#[test]
fn unknown_command_exits_with_failure() {
    let mut command = clink();
    command.arg("deploy");
    command
        .assert()
        .failure()
        .stderr(contains("Command \"deploy\" not found."));
}

#[test]
fn bare_invocation_lists_commands() {
    let mut command = clink();
    command
        .assert()
        .failure()
        .stderr(contains("Usage: clink"))
        .stderr(contains("ask-name"));
}

#[test]
fn ask_name_reads_stdin() {
    let mut command = clink();
    command.arg("ask-name").write_stdin("Grace\n");
    command
        .assert()
        .success()
        .stdout("What is your name? Hello, Grace!\n");
}

#[test]
fn invalid_colour_mode_is_a_configuration_error() {
    let mut command = clink();
    command.args(["--color", "sometimes", "greet"]);
    command
        .assert()
        .failure()
        .stderr(contains("failed to load configuration"));
}

#[test]
fn malformed_log_filter_is_rejected() {
    let mut command = clink();
    command.args(["--log-filter", "clink=notalevel", "greet"]);
    command
        .assert()
        .failure()
        .stderr(contains("invalid log filter"));
}

#[test]
fn configuration_file_selects_colour_output() {
    let dir = TempDir::new().expect("temporary directory");
    let path = dir.path().join("clink.toml");
    fs::write(&path, "color = \"always\"\n").expect("write configuration");

    let mut command = clink();
    command
        .arg("--config-path")
        .arg(&path)
        .args(["greet", "Ada"]);
    command
        .assert()
        .success()
        .stdout("\u{1b}[0;32mHello, Ada!\u{1b}[0m\n");
}
