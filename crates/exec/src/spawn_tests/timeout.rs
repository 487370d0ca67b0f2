// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the timeout-then-SIGKILL behavior and the output deadline.

use std::time::{Duration, Instant};

use super::{assert_consistent, request, sh};
use crate::run;

#[tokio::test]
async fn timeout_kills_with_sigkill() {
    let start = Instant::now();
    let completion = run(&request(&["sleep", "2"]).timeout(Duration::from_millis(1000))).await;
    assert_consistent(&completion);
    assert_eq!(completion.status(), None);
    assert_eq!(completion.signal(), Some("SIGKILL"));
    assert_eq!(
        completion.error().unwrap().to_string(),
        "exec \"sleep 2\": unexpectedly terminated by signal SIGKILL"
    );
    assert!(start.elapsed() < Duration::from_millis(1900), "elapsed = {:?}", start.elapsed());
}

#[tokio::test]
async fn timeout_not_reached_is_success() {
    let completion = run(&request(&["echo", "fast"]).timeout(Duration::from_secs(10))).await;
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "fast\n");
}

#[tokio::test]
async fn sigterm_is_not_enough_to_dodge_the_timeout() {
    // A child that ignores SIGTERM still dies: the timeout always sends SIGKILL.
    let completion = run(&sh("trap '' TERM; exec sleep 5").timeout(Duration::from_millis(200))).await;
    assert_eq!(completion.signal(), Some("SIGKILL"));
}

#[tokio::test]
async fn output_before_timeout_is_kept() {
    let completion = run(&sh("echo partial; exec sleep 5").timeout(Duration::from_millis(300))).await;
    assert_eq!(completion.signal(), Some("SIGKILL"));
    assert_eq!(completion.stdout(), "partial\n");
}

#[tokio::test]
async fn timeout_does_not_wait_for_descendants_holding_pipes() {
    // The background sleep keeps stdout open after `sh` itself is killed.
    let start = Instant::now();
    let completion = run(&sh("sleep 6 & sleep 6").timeout(Duration::from_millis(500))).await;
    assert_consistent(&completion);
    assert_eq!(completion.signal(), Some("SIGKILL"));
    assert!(start.elapsed() < Duration::from_secs(2), "elapsed = {:?}", start.elapsed());
}

#[tokio::test]
async fn deadline_bounds_output_held_open_after_exit() {
    // `sh` exits 0 at once, but its background child holds stdout until it is
    // cut off at the deadline.
    let start = Instant::now();
    let completion = run(&sh("echo started; sleep 6 &").timeout(Duration::from_millis(500))).await;
    assert!(completion.is_success(), "{completion:?}");
    assert_eq!(completion.stdout(), "started\n");
    assert!(start.elapsed() < Duration::from_secs(2), "elapsed = {:?}", start.elapsed());
}

#[tokio::test]
async fn zero_timeout_means_no_timeout() {
    let completion = run(&request(&["echo", "hi"]).timeout(Duration::ZERO)).await;
    assert!(completion.is_success(), "{completion:?}");
    assert_eq!(completion.stdout(), "hi\n");
}
