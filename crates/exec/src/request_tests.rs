// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn splits_program_from_args() {
    let request = ExecRequest::new(["grep", "foobar", "/nonexistent_file"]).unwrap();
    assert_eq!(request.program(), "grep");
    assert_eq!(request.args(), ["foobar", "/nonexistent_file"]);
    assert_eq!(request.argv().collect::<Vec<_>>(), ["grep", "foobar", "/nonexistent_file"]);
}

#[yare::parameterized(
    single          = { &["true"],                            r#""true""# },
    joined          = { &["grep", "foobar", "/nonexistent"],  r#""grep foobar /nonexistent""# },
    embedded_quote  = { &["echo", r#"say "hi""#],             r#""echo say \"hi\"""# },
    backslash       = { &["echo", r"a\b"],                    r#""echo a\\b""# },
    newline         = { &["printf", "a\n"],                   r#""printf a\n""# },
    spaces_in_arg   = { &["ls", "my dir"],                    r#""ls my dir""# },
)]
fn label_is_quoted_join(argv: &[&str], expected: &str) {
    let request = ExecRequest::new(argv.iter().copied()).unwrap();
    assert_eq!(request.label(), expected);
}

#[test]
fn empty_argv_rejected() {
    let err = ExecRequest::new(Vec::<String>::new()).unwrap_err();
    assert_eq!(err, RequestError::EmptyArgv);
}

#[test]
fn nul_byte_rejected_with_index() {
    let err = ExecRequest::new(["echo", "ok", "bad\0arg"]).unwrap_err();
    assert_eq!(err, RequestError::NulByte { index: 2 });
}

#[test]
fn defaults() {
    let request = ExecRequest::new(["true"]).unwrap();
    assert_eq!(request.working_dir(), None);
    assert_eq!(request.timeout_duration(), None);
    assert_eq!(request.output_limit(), None);
    assert_eq!(request.output_encoding(), OutputEncoding::Utf8);
    assert!(!request.includes_stderr());
}

#[test]
fn builder_sets_options() {
    let request = ExecRequest::new(["true"])
        .unwrap()
        .cwd("/tmp")
        .timeout(Duration::from_millis(1500))
        .max_output_bytes(64)
        .encoding(OutputEncoding::Latin1)
        .include_stderr(true);
    assert_eq!(request.working_dir(), Some(Path::new("/tmp")));
    assert_eq!(request.timeout_duration(), Some(Duration::from_millis(1500)));
    assert_eq!(request.output_limit(), Some(64));
    assert_eq!(request.output_encoding(), OutputEncoding::Latin1);
    assert!(request.includes_stderr());
}

#[test]
fn zero_timeout_means_no_timeout() {
    let request = ExecRequest::new(["true"]).unwrap().timeout(Duration::ZERO);
    assert_eq!(request.timeout_duration(), None);

    let request = request.timeout(Duration::from_millis(5)).timeout(Duration::ZERO);
    assert_eq!(request.timeout_duration(), None);
}

#[test]
fn env_and_envs_accumulate() {
    let request = ExecRequest::new(["env"])
        .unwrap()
        .env("A", "1")
        .envs([("B", "2"), ("A", "3")]);
    let env = request.env.as_ref().unwrap();
    assert_eq!(env.get("A").map(String::as_str), Some("3"));
    assert_eq!(env.get("B").map(String::as_str), Some("2"));
}

#[yare::parameterized(
    utf8       = { "utf8",       OutputEncoding::Utf8 },
    utf8_dash  = { "UTF-8",      OutputEncoding::Utf8 },
    latin1     = { "latin1",     OutputEncoding::Latin1 },
    iso        = { "iso-8859-1", OutputEncoding::Latin1 },
    binary     = { "binary",     OutputEncoding::Latin1 },
)]
fn encoding_from_str(name: &str, expected: OutputEncoding) {
    assert_eq!(name.parse::<OutputEncoding>().unwrap(), expected);
}

#[test]
fn unknown_encoding_rejected() {
    let err = "ebcdic".parse::<OutputEncoding>().unwrap_err();
    assert_eq!(err, RequestError::UnknownEncoding { name: "ebcdic".to_string() });
}

#[test]
fn utf8_decode_is_lossy() {
    assert_eq!(OutputEncoding::Utf8.decode(b"ok\xff"), "ok\u{fffd}");
}

#[test]
fn latin1_decode_maps_bytes_to_code_points() {
    assert_eq!(OutputEncoding::Latin1.decode(b"caf\xe9"), "caf\u{e9}");
}
