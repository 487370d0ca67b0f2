// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::time::Duration;

/// Default timeout when `--timeout-ms` is not given (`FXW_TIMEOUT_MS`).
pub fn default_timeout() -> Option<Duration> {
    std::env::var("FXW_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Log filter directive (`FXW_LOG`, default `error`).
pub fn log_filter() -> String {
    std::env::var("FXW_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "error".to_string())
}
