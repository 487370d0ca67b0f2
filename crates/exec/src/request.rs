// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation requests: the argv to exec plus pass-through process options.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;

use crate::RequestError;

/// Text encoding used to decode captured stdout and stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// UTF-8, with invalid sequences replaced by U+FFFD.
    #[default]
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value.
    Latin1,
}

impl OutputEncoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            OutputEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            OutputEncoding::Latin1 => bytes.iter().copied().map(char::from).collect(),
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(OutputEncoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "binary" => Ok(OutputEncoding::Latin1),
            _ => Err(RequestError::UnknownEncoding { name: s.to_string() }),
        }
    }
}

/// One child process to run.
///
/// `argv` is given the way C programs see it: the first element is the
/// program, the rest are its arguments. The program is exec'd directly, so
/// nothing in argv is ever interpreted by a shell.
#[derive(Debug, Clone)]
pub struct ExecRequest {
    program: String,
    args: Vec<String>,
    label: String,
    cwd: Option<PathBuf>,
    env: Option<BTreeMap<String, String>>,
    timeout: Option<Duration>,
    max_output_bytes: Option<usize>,
    uid: Option<u32>,
    gid: Option<u32>,
    encoding: OutputEncoding,
    include_stderr: bool,
}

impl ExecRequest {
    /// Build a request for `argv`.
    ///
    /// Fails if argv is empty or any element contains a NUL byte (which no
    /// exec call can carry).
    pub fn new<I, S>(argv: I) -> Result<Self, RequestError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if let Some(index) = argv.iter().position(|arg| arg.contains('\0')) {
            return Err(RequestError::NulByte { index });
        }
        let label = quote_label(&argv.join(" "));
        let mut argv = argv.into_iter();
        let program = argv.next().ok_or(RequestError::EmptyArgv)?;

        Ok(Self {
            program,
            args: argv.collect(),
            label,
            cwd: None,
            env: None,
            timeout: None,
            max_output_bytes: None,
            uid: None,
            gid: None,
            encoding: OutputEncoding::default(),
            include_stderr: false,
        })
    }

    /// Working directory for the child.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Set one variable in the child's environment.
    ///
    /// Once any variable is set the child sees only the variables given here;
    /// the parent's environment is not inherited.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.get_or_insert_with(BTreeMap::new).insert(key.into(), value.into());
        self
    }

    /// Set several variables in the child's environment. See [`Self::env`].
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env = self.env.get_or_insert_with(BTreeMap::new);
        for (key, value) in vars {
            env.insert(key.into(), value.into());
        }
        self
    }

    /// Kill the child with SIGKILL if it has not exited within `timeout`.
    ///
    /// A zero duration means no timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout).filter(|timeout| !timeout.is_zero());
        self
    }

    /// Cap on the bytes captured from each of stdout and stderr.
    ///
    /// A child that writes more than this is killed and the run fails with
    /// [`Failure::OutputLimit`](crate::Failure::OutputLimit).
    pub fn max_output_bytes(mut self, limit: usize) -> Self {
        self.max_output_bytes = Some(limit);
        self
    }

    /// Run the child as this numeric user id.
    pub fn uid(mut self, uid: u32) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Run the child as this numeric group id.
    pub fn gid(mut self, gid: u32) -> Self {
        self.gid = Some(gid);
        self
    }

    pub fn encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Append the child's stderr to failure messages.
    pub fn include_stderr(mut self, include: bool) -> Self {
        self.include_stderr = include;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The full argv, program first.
    pub fn argv(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }

    /// Quoted, space-joined argv used in error messages, e.g. `"echo hi"`.
    ///
    /// Cosmetic only: it is never handed to a shell.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn output_limit(&self) -> Option<usize> {
        self.max_output_bytes
    }

    pub fn output_encoding(&self) -> OutputEncoding {
        self.encoding
    }

    pub fn includes_stderr(&self) -> bool {
        self.include_stderr
    }

    /// Build the process command: program and args exec'd directly, options
    /// passed through, stdout and stderr piped for capture.
    pub(crate) fn command(&self) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args);
        if let Some(ref dir) = self.cwd {
            command.current_dir(dir);
        }
        if let Some(ref env) = self.env {
            command.env_clear();
            command.envs(env);
        }
        if let Some(uid) = self.uid {
            command.uid(uid);
        }
        if let Some(gid) = self.gid {
            command.gid(gid);
        }
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);
        command
    }
}

/// Double-quote `s` as a JSON string literal.
fn quote_label(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
