// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests that spawn real child processes.

use super::*;

mod basic;
mod callback;
mod failures;
mod options;
mod readers;
mod timeout;

/// Build a request from a literal argv.
pub(crate) fn request(argv: &[&str]) -> ExecRequest {
    ExecRequest::new(argv.iter().copied()).unwrap()
}

/// Request that runs `script` under `sh -c`.
pub(crate) fn sh(script: &str) -> ExecRequest {
    request(&["sh", "-c", script])
}

/// Every completion must satisfy the outcome invariants.
pub(crate) fn assert_consistent(completion: &Completion) {
    assert_eq!(
        completion.error().is_none(),
        completion.status() == Some(0) && completion.signal().is_none(),
        "error must be absent exactly on status 0: {completion:?}"
    );
    assert!(
        completion.status().is_none() || completion.signal().is_none(),
        "status and signal both set: {completion:?}"
    );
}
