// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The normalized result of one fork-exec-wait cycle.

use serde::Serialize;

use crate::{ExecError, Failure};

/// Success, or the one way the invocation failed.
///
/// A success always means exit status 0. The failure shapes live in
/// [`Failure`], so a completion can never carry both a status and a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed(ExecError),
}

/// Outcome plus captured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    outcome: Outcome,
    stdout: String,
    stderr: String,
}

impl Completion {
    pub(crate) fn new(outcome: Outcome, stdout: String, stderr: String) -> Self {
        Self {
            outcome,
            stdout,
            stderr,
        }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// `None` exactly when the child was spawned, exited normally, and
    /// returned status 0.
    pub fn error(&self) -> Option<&ExecError> {
        match &self.outcome {
            Outcome::Success => None,
            Outcome::Failed(err) => Some(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    /// Exit status: 0 on success, the code on nonzero exit, otherwise `None`.
    pub fn status(&self) -> Option<i32> {
        match &self.outcome {
            Outcome::Success => Some(0),
            Outcome::Failed(err) => err.status(),
        }
    }

    /// Name of the terminating signal when the child was killed.
    pub fn signal(&self) -> Option<&str> {
        self.error().and_then(ExecError::signal)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Split into `Ok(stdout)` on success or the error otherwise.
    pub fn into_result(self) -> Result<String, ExecError> {
        match self.outcome {
            Outcome::Success => Ok(self.stdout),
            Outcome::Failed(err) => Err(err),
        }
    }

    /// Flat view with nullable fields.
    pub fn to_record(&self) -> CompletionRecord {
        CompletionRecord {
            error: self.error().map(ToString::to_string),
            status: self.status(),
            signal: self.signal().map(str::to_string),
            spawn_error_kind: match self.error().map(ExecError::failure) {
                Some(Failure::Spawn { kind, .. }) => Some(format!("{kind:?}")),
                _ => None,
            },
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        }
    }
}

/// Serializable `{ error, status, signal, stdout, stderr }` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRecord {
    /// The full error message, or null on success.
    pub error: Option<String>,
    pub status: Option<i32>,
    pub signal: Option<String>,
    /// I/O error kind for spawn failures (e.g. `NotFound`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_error_kind: Option<String>,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
