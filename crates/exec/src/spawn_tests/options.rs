// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for options passed through to the child.

use std::time::{Duration, Instant};

use super::{assert_consistent, request, sh};
use crate::{run, ExecError, Failure, OutputEncoding, OutputStream};

// ---------------------------------------------------------------------------
// Working directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cwd_sets_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    // Canonicalize to resolve symlinks (e.g., /var -> /private/var on macOS)
    let canonical = dir.path().canonicalize().unwrap();

    let completion = run(&request(&["pwd", "-P"]).cwd(dir.path())).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout().trim_end(), canonical.to_str().unwrap());
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn env_replaces_inherited_environment() {
    let completion = run(&request(&["/usr/bin/env"]).env("FXW_TEST_VAR", "test_value")).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "FXW_TEST_VAR=test_value\n");
}

#[tokio::test]
async fn envs_passes_multiple_variables() {
    let completion = run(&request(&["/usr/bin/env"]).envs([("VAR_A", "alpha"), ("VAR_B", "beta")])).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "VAR_A=alpha\nVAR_B=beta\n");
}

#[tokio::test]
async fn environment_inherited_without_env() {
    let completion = run(&sh("test -n \"$PATH\"")).await;
    assert!(completion.is_success());
}

// ---------------------------------------------------------------------------
// Output limit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn output_limit_truncates_and_fails() {
    let completion = run(&sh("while :; do echo xxxxxxxx; done").max_output_bytes(16)).await;
    assert_consistent(&completion);
    assert_eq!(completion.stdout(), "xxxxxxxx\nxxxxxxx");
    assert_eq!(completion.status(), None);
    assert_eq!(completion.signal(), None);
    assert_eq!(
        completion.error().unwrap().failure(),
        &Failure::OutputLimit { stream: OutputStream::Stdout, limit: 16 }
    );
    assert_eq!(
        completion.error().unwrap().to_string(),
        "exec \"sh -c while :; do echo xxxxxxxx; done\": stdout exceeded the output limit of 16 bytes"
    );
}

#[tokio::test]
async fn output_limit_uses_sigkill_when_timeout_set() {
    // SIGTERM is ignored here, so only SIGKILL ends the child before the timeout.
    let start = Instant::now();
    let request = sh("trap '' TERM; while :; do echo xxxxxxxx; done")
        .max_output_bytes(16)
        .timeout(Duration::from_secs(30));
    let completion = run(&request).await;
    assert!(start.elapsed() < Duration::from_secs(10), "elapsed = {:?}", start.elapsed());
    assert_eq!(completion.signal(), None);
    assert!(matches!(
        completion.error().map(ExecError::failure),
        Some(Failure::OutputLimit { stream: OutputStream::Stdout, limit: 16 })
    ));
    assert_eq!(completion.stdout().len(), 16);
}

#[tokio::test]
async fn output_limit_applies_to_stderr() {
    let completion = run(&sh("while :; do echo yyyy >&2; done").max_output_bytes(8)).await;
    assert_consistent(&completion);
    assert_eq!(completion.stderr(), "yyyy\nyyy");
    assert!(matches!(
        completion.error().map(ExecError::failure),
        Some(Failure::OutputLimit { stream: OutputStream::Stderr, limit: 8 })
    ));
}

#[tokio::test]
async fn output_limit_fails_even_when_child_exits_cleanly() {
    // The whole write fits in the pipe, so the child may exit 0 before the
    // reader sees the excess.
    let completion = run(&request(&["printf", "0123456789abcdef"]).max_output_bytes(10)).await;
    assert_consistent(&completion);
    assert_eq!(completion.stdout(), "0123456789");
    assert_eq!(completion.status(), None);
    assert!(matches!(
        completion.error().map(ExecError::failure),
        Some(Failure::OutputLimit { stream: OutputStream::Stdout, limit: 10 })
    ));
}

#[tokio::test]
async fn output_within_limit_is_untouched() {
    let completion = run(&request(&["echo", "short"]).max_output_bytes(64)).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "short\n");
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn latin1_encoding_decodes_high_bytes() {
    let completion = run(&request(&["printf", "caf\\351"]).encoding(OutputEncoding::Latin1)).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "caf\u{e9}");
}

#[tokio::test]
async fn utf8_encoding_replaces_invalid_bytes() {
    let completion = run(&request(&["printf", "caf\\351"])).await;
    assert_eq!(completion.stdout(), "caf\u{fffd}");
}
