// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the callback form of `run`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

use super::request;
use crate::{run_with_callback, Completion};

#[tokio::test]
async fn callback_receives_completion() {
    let (tx, rx) = oneshot::channel::<Completion>();
    let handle = run_with_callback(request(&["echo", "hi"]), move |completion| {
        let _ = tx.send(completion);
    });
    handle.await.unwrap();

    let completion = rx.await.unwrap();
    assert!(completion.is_success());
    assert_eq!(completion.stdout(), "hi\n");
}

#[tokio::test]
async fn spawn_failure_is_delivered_asynchronously() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let (tx, rx) = oneshot::channel::<Completion>();

    let handle = run_with_callback(request(&["/dev/null"]), move |completion| {
        seen.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(completion);
    });
    // Current-thread runtime: the task cannot have run before we yield.
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    handle.await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let completion = rx.await.unwrap();
    assert!(completion.error().unwrap().to_string().starts_with("exec \"/dev/null\": "));
    assert_eq!(completion.status(), None);
    assert_eq!(completion.signal(), None);
}
