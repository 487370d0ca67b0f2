// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fxw`: run one program and report exactly how it finished.

mod env;
mod exit_error;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use fxw_exec::{ExecRequest, OutputEncoding};
use tracing_subscriber::EnvFilter;

use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "fxw", version, about = "Run a program directly (no shell) and report how it finished")]
struct Cli {
    /// Kill the program with SIGKILL after this many milliseconds
    /// (default: $FXW_TIMEOUT_MS, otherwise no timeout; 0 disables it)
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Working directory for the program
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Run with exactly these environment variables (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,

    /// Stop the program and fail if stdout or stderr exceeds this many bytes
    #[arg(long, value_name = "BYTES")]
    max_output_bytes: Option<usize>,

    /// Numeric user id to run as
    #[arg(long)]
    uid: Option<u32>,

    /// Numeric group id to run as
    #[arg(long)]
    gid: Option<u32>,

    /// Encoding used to decode captured output (utf8, latin1)
    #[arg(long, default_value = "utf8", value_parser = parse_encoding)]
    encoding: OutputEncoding,

    /// Append the program's stderr to the failure message
    #[arg(long)]
    include_stderr: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t)]
    output: OutputFormat,

    /// Program to run, followed by its arguments
    #[arg(required = true, trailing_var_arg = true, value_name = "PROGRAM")]
    argv: Vec<String>,
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        if let Some(exit) = err.downcast_ref::<ExitError>() {
            if !exit.message.is_empty() {
                eprintln!("{}", exit.message);
            }
            std::process::exit(exit.code);
        }
        eprintln!("fxw: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let request = build_request(&cli)?;
    tracing::debug!(cmd = request.label(), "running");

    let completion = fxw_exec::run(&request).await;
    output::write_completion(
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
        &completion,
        cli.output,
    )?;

    match ExitError::for_completion(&completion) {
        Some(exit) => Err(exit.into()),
        None => Ok(()),
    }
}

fn build_request(cli: &Cli) -> Result<ExecRequest> {
    let mut request = ExecRequest::new(cli.argv.iter().cloned())
        .map_err(|e| ExitError::new(2, format!("fxw: {e}")))?
        .encoding(cli.encoding)
        .include_stderr(cli.include_stderr);

    if let Some(timeout) = cli.timeout_ms.map(Duration::from_millis).or_else(env::default_timeout) {
        request = request.timeout(timeout);
    }
    if let Some(ref dir) = cli.cwd {
        request = request.cwd(dir.clone());
    }
    if !cli.env.is_empty() {
        request = request.envs(cli.env.iter().cloned());
    }
    if let Some(limit) = cli.max_output_bytes {
        request = request.max_output_bytes(limit);
    }
    if let Some(uid) = cli.uid {
        request = request.uid(uid);
    }
    if let Some(gid) = cli.gid {
        request = request.gid(gid);
    }
    Ok(request)
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}

fn parse_encoding(s: &str) -> Result<OutputEncoding, String> {
    s.parse().map_err(|e: fxw_exec::RequestError| e.to_string())
}

/// Log to stderr, filtered by `FXW_LOG` (default `error`).
fn init_logging() {
    let filter = EnvFilter::try_new(env::log_filter()).unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
