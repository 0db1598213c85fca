//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data
//! directory (STUDYWATCH_ENV=dev) and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "studywatch-cli", "--"])
        .args(args)
        .env("STUDYWATCH_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "policy.study_cutoff_secs"]);
    assert_eq!(code, 0, "config get failed");
    assert!(
        stdout.trim().parse::<i64>().is_ok(),
        "expected a number, got {stdout:?}"
    );
}

#[test]
fn test_config_get_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "policy.no_such_key"]);
    assert_ne!(code, 0, "unknown key should fail");
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config list is not valid JSON");
    assert!(parsed.get("policy").is_some());
    assert!(parsed.get("display").is_some());
}

#[test]
fn test_config_set_roundtrip() {
    let (stdout, _, code) = run_cli(&["config", "set", "controls.adjust_step_secs", "15"]);
    assert_eq!(code, 0, "config set failed");
    assert!(stdout.contains("ok"));

    let (stdout, _, code) = run_cli(&["config", "get", "controls.adjust_step_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "15");

    let (_, _, code) = run_cli(&["config", "reset"]);
    assert_eq!(code, 0, "config reset failed");
}

#[test]
fn test_config_set_rejects_bad_value() {
    let (_, _, code) = run_cli(&["config", "set", "display.tick_interval_ms", "fast"]);
    assert_ne!(code, 0, "non-numeric tick interval should be rejected");
}

#[test]
fn test_log_show() {
    let (stdout, _, code) = run_cli(&["log", "show"]);
    assert_eq!(code, 0, "log show failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_log_path() {
    let (stdout, _, code) = run_cli(&["log", "path"]);
    assert_eq!(code, 0, "log path failed");
    assert!(stdout.contains("break_log.csv"));
}

#[test]
fn test_completions_bash() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "completions failed");
    assert!(stdout.contains("studywatch"));
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("Run the interactive timer widget"));
}
