// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};

use clap::ValueEnum;
use fxw_exec::Completion;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Report a completion.
///
/// `Text` replays the child's stdout and stderr and then prints the failure
/// message, if any, to `err`. `Json` prints the flat completion record to
/// `out`.
pub fn write_completion(
    out: &mut impl Write,
    err: &mut impl Write,
    completion: &Completion,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            out.write_all(completion.stdout().as_bytes())?;
            err.write_all(completion.stderr().as_bytes())?;
            if let Some(failure) = completion.error() {
                writeln!(err, "fxw: {failure}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &completion.to_record())?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    err.flush()
}
