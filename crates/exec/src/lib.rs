// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fork, exec, and wait for a single child process.
//!
//! [`run`] spawns the program named by an [`ExecRequest`] directly (never via
//! a shell), waits for it, and reports the outcome as one [`Completion`]. The
//! completion is a success exactly when [`Completion::error`] is `None`; the
//! three failure shapes (spawn failure, signal death, nonzero exit) each carry
//! an [`ExecError`] whose message names the command and the failure mode.
//! Going over the output cap fails in the spawn-failure shape:
//!
//! ```text
//! exec "grep foobar /nonexistent_file": exited with status 2
//! exec "sleep 2": unexpectedly terminated by signal SIGKILL
//! exec "yes": stdout exceeded the output limit of 1024 bytes
//! ```

mod completion;
mod error;
mod interpret;
mod request;
mod spawn;

pub use completion::{Completion, CompletionRecord, Outcome};
pub use error::{ExecError, Failure, OutputStream, RequestError};
pub use interpret::{interpret, signal_name, RawCompletion};
pub use request::{ExecRequest, OutputEncoding};
pub use spawn::{run, run_with_callback};
