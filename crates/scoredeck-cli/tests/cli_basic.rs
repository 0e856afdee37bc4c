//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only
//! commands that touch no per-user state are exercised here; everything
//! stateful is covered by the core crate's unit tests.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "scoredeck-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _stderr, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("Scoredeck station CLI"));
    assert!(stdout.contains("timer"));
    assert!(stdout.contains("slot"));
    assert!(stdout.contains("submit"));
}

#[test]
fn test_version() {
    let (stdout, _stderr, code) = run_cli(&["--version"]);
    assert_eq!(code, 0, "version failed");
    assert!(stdout.contains("scoredeck"));
}

#[test]
fn test_subcommand_help() {
    let (stdout, _stderr, code) = run_cli(&["timer", "--help"]);
    assert_eq!(code, 0, "timer help failed");
    assert!(stdout.contains("set"));
    assert!(stdout.contains("pause"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let (_stdout, _stderr, code) = run_cli(&["frobnicate"]);
    assert_ne!(code, 0, "unknown subcommand unexpectedly succeeded");
}
