// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for spawn failures, nonzero exits, and signal deaths.

use super::{assert_consistent, request, sh};
use crate::{run, Failure};

// ---------------------------------------------------------------------------
// Spawn failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_executable_program_fails_to_spawn() {
    let completion = run(&request(&["/dev/null"])).await;
    assert_consistent(&completion);
    let err = completion.error().unwrap();
    assert!(
        err.to_string().starts_with("exec \"/dev/null\": "),
        "message = {err}"
    );
    assert_eq!(completion.status(), None);
    assert_eq!(completion.signal(), None);
    assert_eq!(completion.stdout(), "");
    assert_eq!(completion.stderr(), "");
}

#[tokio::test]
async fn missing_program_fails_to_spawn() {
    let completion = run(&request(&["/nonexistent/fxw_test_program_12345", "arg"])).await;
    assert_consistent(&completion);
    match completion.error().map(|err| err.failure()) {
        Some(Failure::Spawn { kind, .. }) => assert_eq!(*kind, std::io::ErrorKind::NotFound),
        other => panic!("expected Spawn, got: {other:?}"),
    }
    assert!(completion
        .error()
        .unwrap()
        .to_string()
        .starts_with("exec \"/nonexistent/fxw_test_program_12345 arg\": "));
}

#[tokio::test]
async fn missing_cwd_fails_to_spawn() {
    let completion = run(&request(&["true"]).cwd("/nonexistent/fxw_test_dir_12345")).await;
    assert_consistent(&completion);
    assert!(matches!(
        completion.error().map(|err| err.failure()),
        Some(Failure::Spawn { .. })
    ));
}

// ---------------------------------------------------------------------------
// Nonzero exit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn grep_missing_file_exits_2() {
    let completion = run(&request(&["grep", "foobar", "/nonexistent_file"])).await;
    assert_consistent(&completion);
    assert_eq!(
        completion.error().unwrap().to_string(),
        "exec \"grep foobar /nonexistent_file\": exited with status 2"
    );
    assert_eq!(completion.status(), Some(2));
    assert_eq!(completion.signal(), None);
    assert_eq!(completion.stdout(), "");
    assert!(
        completion.stderr().contains("No such file or directory"),
        "stderr = {}",
        completion.stderr()
    );
}

#[tokio::test]
async fn include_stderr_appends_trimmed_stderr() {
    let script = "echo 'He has killed me, mother.' >&2; exit 23";
    let completion = run(&sh(script).include_stderr(true)).await;
    assert_consistent(&completion);
    assert_eq!(
        completion.error().unwrap().to_string(),
        format!("exec \"sh -c {script}\": exited with status 23: He has killed me, mother.")
    );
    assert_eq!(completion.status(), Some(23));
    assert_eq!(completion.stdout(), "");
    assert_eq!(completion.stderr(), "He has killed me, mother.\n");
}

#[tokio::test]
async fn stderr_left_out_of_message_by_default() {
    let script = "echo 'He has killed me, mother.' >&2; exit 23";
    let completion = run(&sh(script)).await;
    assert_eq!(
        completion.error().unwrap().to_string(),
        format!("exec \"sh -c {script}\": exited with status 23")
    );
    assert_eq!(completion.stderr(), "He has killed me, mother.\n");
}

#[tokio::test]
async fn include_stderr_with_silent_failure() {
    let completion = run(&request(&["false"]).include_stderr(true)).await;
    assert_eq!(
        completion.error().unwrap().to_string(),
        "exec \"false\": exited with status 1"
    );
}

// ---------------------------------------------------------------------------
// Signal death
// ---------------------------------------------------------------------------

#[tokio::test]
async fn self_inflicted_signal_is_reported() {
    let completion = run(&sh("kill -TERM $$")).await;
    assert_consistent(&completion);
    assert_eq!(completion.signal(), Some("SIGTERM"));
    assert_eq!(completion.status(), None);
    assert_eq!(
        completion.error().unwrap().to_string(),
        "exec \"sh -c kill -TERM $$\": unexpectedly terminated by signal SIGTERM"
    );
}
