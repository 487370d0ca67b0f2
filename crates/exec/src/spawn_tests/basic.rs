// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for successful runs and output capture.

use super::{assert_consistent, request, sh};
use crate::run;

#[tokio::test]
async fn echo_succeeds() {
    let completion = run(&request(&["echo", "hello", "world"])).await;
    assert_consistent(&completion);
    assert!(completion.error().is_none());
    assert_eq!(completion.status(), Some(0));
    assert_eq!(completion.signal(), None);
    assert_eq!(completion.stdout(), "hello world\n");
    assert_eq!(completion.stderr(), "");
}

#[tokio::test]
async fn args_are_not_shell_interpreted() {
    let completion = run(&request(&["echo", "$HOME", "`pwd`", "a;b"])).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "$HOME `pwd` a;b\n");
}

#[tokio::test]
async fn captures_stdout_and_stderr_separately() {
    let completion = run(&sh("echo out; echo err >&2")).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "out\n");
    assert_eq!(completion.stderr(), "err\n");
}

#[tokio::test]
async fn large_output_does_not_deadlock() {
    // Well past a pipe buffer on both streams.
    let completion = run(&sh("head -c 300000 /dev/zero; head -c 300000 /dev/zero >&2")).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout().len(), 300_000);
    assert_eq!(completion.stderr().len(), 300_000);
}

#[tokio::test]
async fn stdin_is_empty() {
    let completion = run(&request(&["cat"])).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_runs_are_independent() {
    let ok = request(&["echo", "one"]);
    let bad = sh("echo two >&2; exit 4");
    let (first, second) = tokio::join!(run(&ok), run(&bad));

    assert!(first.is_success());
    assert_eq!(first.stdout(), "one\n");

    assert_eq!(second.status(), Some(4));
    assert_eq!(second.stderr(), "two\n");
}
