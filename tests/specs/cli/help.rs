//! CLI help output specs

use crate::prelude::*;

#[test]
fn fxw_help_shows_usage() {
    fxw().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("--timeout-ms");
}

#[test]
fn fxw_version_shows_version() {
    fxw().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn fxw_without_program_is_a_usage_error() {
    fxw().exits_with(2).stderr_has("PROGRAM");
}

#[test]
fn fxw_rejects_malformed_env_pair() {
    fxw().args(&["--env", "NOEQUALS", "true"]).exits_with(2).stderr_has("KEY=VALUE");
}
