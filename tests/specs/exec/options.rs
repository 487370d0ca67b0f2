//! Pass-through options: cwd, env, output limit, default timeout.

use crate::prelude::*;

#[test]
fn cwd_is_passed_through() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    let cwd = dir.path().to_str().unwrap();

    fxw()
        .args(&["--cwd", cwd, "pwd", "-P"])
        .passes()
        .stdout_eq(&format!("{}\n", canonical.display()));
}

#[test]
fn env_replaces_environment() {
    fxw()
        .args(&["--env", "A=1", "--env", "B=two words", "/usr/bin/env"])
        .passes()
        .stdout_eq("A=1\nB=two words\n");
}

#[test]
fn output_limit_stops_chatty_program() {
    let done = fxw()
        .args(&["--max-output-bytes", "16", "sh", "-c", "while :; do echo xxxxxxxx; done"])
        .exits_with(1)
        .stderr_has("stdout exceeded the output limit of 16 bytes");
    assert_eq!(done.stdout(), "xxxxxxxx\nxxxxxxx");
}

#[test]
fn output_limit_record_has_neither_status_nor_signal() {
    let record = fxw()
        .args(&["-o", "json", "--max-output-bytes", "4", "printf", "0123456789"])
        .exits_with(1)
        .record();
    assert_eq!(record["status"], serde_json::Value::Null);
    assert_eq!(record["signal"], serde_json::Value::Null);
    assert_eq!(record["stdout"], "0123");
    assert_eq!(
        record["error"],
        "exec \"printf 0123456789\": stdout exceeded the output limit of 4 bytes"
    );
}

#[test]
fn zero_timeout_disables_the_deadline() {
    fxw()
        .args(&["--timeout-ms", "0", "sh", "-c", "sleep 0.2; echo done"])
        .passes()
        .stdout_eq("done\n");
}

#[test]
fn default_timeout_from_environment() {
    fxw()
        .env("FXW_TIMEOUT_MS", "200")
        .args(&["sleep", "5"])
        .exits_with(137)
        .stderr_has("unexpectedly terminated by signal SIGKILL");
}

#[test]
fn flag_overrides_environment_timeout() {
    fxw()
        .env("FXW_TIMEOUT_MS", "1")
        .args(&["--timeout-ms", "10000", "sh", "-c", "sleep 0.2; echo done"])
        .passes()
        .stdout_eq("done\n");
}
