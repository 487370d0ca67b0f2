// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("fxw").chain(args.iter().copied())).unwrap()
}

#[yare::parameterized(
    simple      = { "A=1",       "A", "1" },
    empty_value = { "A=",        "A", "" },
    value_has_eq = { "A=b=c",    "A", "b=c" },
)]
fn env_pair_parses(input: &str, key: &str, value: &str) {
    assert_eq!(parse_env_pair(input).unwrap(), (key.to_string(), value.to_string()));
}

#[yare::parameterized(
    no_equals = { "A" },
    empty_key = { "=1" },
)]
fn env_pair_rejects(input: &str) {
    assert!(parse_env_pair(input).is_err());
}

#[test]
fn encoding_rejects_unknown_names() {
    let err = parse_encoding("ebcdic").unwrap_err();
    assert!(err.contains("ebcdic"), "err = {err}");
}

#[test]
fn trailing_args_belong_to_the_program() {
    let cli = parse(&["--timeout-ms", "500", "ls", "-l", "--color"]);
    assert_eq!(cli.argv, ["ls", "-l", "--color"]);
    assert_eq!(cli.timeout_ms, Some(500));
}

#[test]
fn double_dash_separates_program() {
    let cli = parse(&["--include-stderr", "--", "grep", "-q", "x"]);
    assert!(cli.include_stderr);
    assert_eq!(cli.argv, ["grep", "-q", "x"]);
}

#[test]
fn program_is_required() {
    assert!(Cli::try_parse_from(["fxw"]).is_err());
}

#[test]
fn build_request_applies_flags() {
    let cli = parse(&[
        "--timeout-ms",
        "250",
        "--cwd",
        "/tmp",
        "--env",
        "A=1",
        "--max-output-bytes",
        "10",
        "--encoding",
        "latin1",
        "-o",
        "json",
        "echo",
        "hi",
    ]);
    assert_eq!(cli.output, OutputFormat::Json);

    let request = build_request(&cli).unwrap();
    assert_eq!(request.label(), "\"echo hi\"");
    assert_eq!(request.timeout_duration(), Some(Duration::from_millis(250)));
    assert_eq!(request.working_dir(), Some(std::path::Path::new("/tmp")));
    assert_eq!(request.output_limit(), Some(10));
    assert_eq!(request.output_encoding(), OutputEncoding::Latin1);
}
