//! The four outcome classes, seen from the command line.

use crate::prelude::*;

#[test]
fn success_replays_stdout_and_exits_zero() {
    fxw().args(&["echo", "hello", "world"]).passes().stdout_eq("hello world\n").stderr_eq("");
}

#[test]
fn nonzero_exit_is_mirrored() {
    fxw()
        .args(&["grep", "foobar", "/nonexistent_file"])
        .exits_with(2)
        .stdout_eq("")
        .stderr_has("No such file or directory")
        .stderr_has("fxw: exec \"grep foobar /nonexistent_file\": exited with status 2\n");
}

#[test]
fn timeout_reports_sigkill() {
    fxw()
        .args(&["--timeout-ms", "1000", "sleep", "2"])
        .exits_with(137)
        .stderr_eq("fxw: exec \"sleep 2\": unexpectedly terminated by signal SIGKILL\n");
}

#[test]
fn spawn_failure_exits_127() {
    fxw().args(&["/dev/null"]).exits_with(127).stderr_has("fxw: exec \"/dev/null\": ");
}

#[test]
fn include_stderr_extends_message() {
    let script = "echo 'He has killed me, mother.' >&2; exit 23";
    fxw()
        .args(&["--include-stderr", "--", "sh", "-c", script])
        .exits_with(23)
        .stderr_has(&format!(
            "fxw: exec \"sh -c {script}\": exited with status 23: He has killed me, mother.\n"
        ));
}

#[test]
fn json_record_for_success() {
    let done = fxw().args(&["-o", "json", "echo", "hello", "world"]).passes();
    assert_eq!(
        done.record(),
        serde_json::json!({
            "error": null,
            "status": 0,
            "signal": null,
            "stdout": "hello world\n",
            "stderr": "",
        })
    );
}

#[test]
fn json_record_for_timeout() {
    let done = fxw().args(&["-o", "json", "--timeout-ms", "200", "sleep", "5"]).exits_with(137);
    let record = done.record();
    assert_eq!(record["status"], serde_json::Value::Null);
    assert_eq!(record["signal"], "SIGKILL");
    assert_eq!(record["error"], "exec \"sleep 5\": unexpectedly terminated by signal SIGKILL");
}

#[test]
fn json_record_for_spawn_failure() {
    let done = fxw().args(&["-o", "json", "/nonexistent/fxw_spec_program"]).exits_with(127);
    let record = done.record();
    assert_eq!(record["status"], serde_json::Value::Null);
    assert_eq!(record["signal"], serde_json::Value::Null);
    assert_eq!(record["spawn_error_kind"], "NotFound");
    assert_eq!(record["stdout"], "");
    assert_eq!(record["stderr"], "");
}
