// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for request validation and child process failures.

use std::fmt;
use std::io;

use thiserror::Error;

/// A malformed [`ExecRequest`](crate::ExecRequest).
///
/// These are caller bugs, reported synchronously when the request is built.
/// They never travel through the completion channel.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("argv must contain at least the program to run")]
    EmptyArgv,

    #[error("argv[{index}] contains a NUL byte")]
    NulByte { index: usize },

    #[error("unknown output encoding `{name}`")]
    UnknownEncoding { name: String },
}

/// How a child process failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Failure {
    /// The child was never started (fork or exec failed), or waiting on it
    /// failed. Neither an exit status nor a signal is available.
    #[error("{message}")]
    Spawn { kind: io::ErrorKind, message: String },

    /// The child was terminated by a signal, including our own timeout kill.
    #[error("unexpectedly terminated by signal {signal}")]
    Signaled { signal: String },

    /// The child ran to completion and exited non-zero.
    #[error("exited with status {status}")]
    Exited { status: i32 },

    /// One of the child's output streams went past the request's cap. The
    /// child was killed, but its wait status is not part of the outcome.
    #[error("{stream} exceeded the output limit of {limit} bytes")]
    OutputLimit { stream: OutputStream, limit: usize },
}

/// One of the child's captured output pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputStream::Stdout => "stdout",
            OutputStream::Stderr => "stderr",
        })
    }
}

/// A failed invocation, labelled with the command that failed.
///
/// Renders as `exec <label>: <failure>`, optionally followed by
/// `: <stderr>` when the request asked for stderr in the message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("exec {label}: {failure}{}", stderr.as_deref().map(|s| format!(": {s}")).unwrap_or_default())]
pub struct ExecError {
    label: String,
    failure: Failure,
    stderr: Option<String>,
}

impl ExecError {
    pub(crate) fn new(label: impl Into<String>, failure: Failure) -> Self {
        Self {
            label: label.into(),
            failure,
            stderr: None,
        }
    }

    /// Attach the child's stderr to the message.
    ///
    /// Only signal deaths and nonzero exits take the suffix, and only when the
    /// stderr text is non-empty. One trailing newline is trimmed.
    pub(crate) fn with_stderr(mut self, stderr: &str) -> Self {
        if matches!(self.failure, Failure::Spawn { .. } | Failure::OutputLimit { .. }) {
            return self;
        }
        let trimmed = stderr.strip_suffix('\n').unwrap_or(stderr);
        if !trimmed.is_empty() {
            self.stderr = Some(trimmed.to_string());
        }
        self
    }

    /// The quoted command label, e.g. `"sleep 2"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// Exit status, if the child exited on its own with a nonzero code.
    pub fn status(&self) -> Option<i32> {
        match self.failure {
            Failure::Exited { status } => Some(status),
            _ => None,
        }
    }

    /// Name of the terminating signal, if the child was killed.
    pub fn signal(&self) -> Option<&str> {
        match &self.failure {
            Failure::Signaled { signal } => Some(signal),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
