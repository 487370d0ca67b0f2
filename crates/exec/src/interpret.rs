// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turn a raw process completion into a normalized [`Completion`].

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use nix::sys::signal::Signal;

use crate::{Completion, ExecError, Failure, OutputStream, Outcome};

/// What the platform reported when the child finished (or failed to start).
#[derive(Debug)]
pub enum RawCompletion {
    /// The child was reaped with this wait status.
    Status(ExitStatus),
    /// Spawning, waiting, or reading the child's output failed; there is no
    /// wait status.
    Error(io::Error),
    /// `stream` went past `limit` bytes and the child was killed for it.
    OutputLimit { stream: OutputStream, limit: usize },
}

impl From<io::Result<ExitStatus>> for RawCompletion {
    fn from(result: io::Result<ExitStatus>) -> Self {
        match result {
            Ok(status) => RawCompletion::Status(status),
            Err(err) => RawCompletion::Error(err),
        }
    }
}

/// Classify `raw` and build the completion record for the command `label`.
///
/// This is a pure function of its inputs. With `include_stderr`, signal
/// deaths and nonzero exits get the child's stderr appended to the message.
///
/// # Panics
///
/// If `raw` is a wait status carrying neither an exit code nor a terminating
/// signal. `wait(2)` never reports such a status for a reaped child, so this
/// means the caller fed in something that is not a completion.
pub fn interpret(
    label: &str,
    raw: &RawCompletion,
    stdout: String,
    stderr: String,
    include_stderr: bool,
) -> Completion {
    let failure = match raw {
        RawCompletion::Error(err) => Some(Failure::Spawn {
            kind: err.kind(),
            message: err.to_string(),
        }),
        RawCompletion::OutputLimit { stream, limit } => Some(Failure::OutputLimit {
            stream: *stream,
            limit: *limit,
        }),
        RawCompletion::Status(status) => classify_status(*status),
    };

    let outcome = match failure {
        None => Outcome::Success,
        Some(failure) => {
            let err = ExecError::new(label, failure);
            Outcome::Failed(if include_stderr { err.with_stderr(&stderr) } else { err })
        }
    };

    Completion::new(outcome, stdout, stderr)
}

/// `None` for a clean exit, otherwise the signal death or nonzero exit.
fn classify_status(status: ExitStatus) -> Option<Failure> {
    if let Some(signo) = status.signal() {
        return Some(Failure::Signaled {
            signal: signal_name(signo),
        });
    }
    match status.code() {
        Some(0) => None,
        Some(status) => Some(Failure::Exited { status }),
        None => unreachable!("wait status {status:?} has neither an exit code nor a signal"),
    }
}

/// Conventional name of signal number `signo`, e.g. `SIGKILL` for 9.
///
/// Numbers without a name (real-time signals) render as `SIG<n>`.
pub fn signal_name(signo: i32) -> String {
    match Signal::try_from(signo) {
        Ok(signal) => signal.as_str().to_string(),
        Err(_) => format!("SIG{signo}"),
    }
}

#[cfg(test)]
#[path = "interpret_tests.rs"]
mod tests;
