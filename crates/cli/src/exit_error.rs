// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! `run` returns `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use fxw_exec::{Completion, Failure};
use nix::sys::signal::Signal;

/// Exit code when the program could not be started, as shells use.
pub const SPAWN_FAILED: i32 = 127;

/// Exit code when the program was stopped for going over the output limit.
pub const OUTPUT_LIMIT: i32 = 1;

/// Base added to a signal number when the program was killed.
pub const SIGNAL_BASE: i32 = 128;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Exit code mirroring how the child finished, or `None` on success.
    ///
    /// The failure message has already been printed, so the error is silent.
    pub fn for_completion(completion: &Completion) -> Option<Self> {
        let code = match completion.error()?.failure() {
            Failure::Spawn { .. } => SPAWN_FAILED,
            Failure::OutputLimit { .. } => OUTPUT_LIMIT,
            Failure::Exited { status } => *status,
            Failure::Signaled { signal } => {
                SIGNAL_BASE + signal.parse::<Signal>().map(|s| s as i32).unwrap_or(0)
            }
        };
        Some(Self::new(code, String::new()))
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
