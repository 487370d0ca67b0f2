//! Shared helpers for the `fxw` specs.

use std::process::Output;

/// A pending `fxw` invocation.
pub struct Invocation {
    cmd: assert_cmd::Command,
}

/// Start building an `fxw` invocation with a clean logging setup.
pub fn fxw() -> Invocation {
    #[allow(clippy::expect_used)]
    let mut cmd = assert_cmd::Command::cargo_bin("fxw").expect("fxw binary is built");
    cmd.env_remove("FXW_TIMEOUT_MS").env_remove("FXW_LOG");
    Invocation { cmd }
}

impl Invocation {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> Finished {
        self.exits_with(0)
    }

    /// Run and require exactly `code`.
    pub fn exits_with(mut self, code: i32) -> Finished {
        #[allow(clippy::expect_used)]
        let output = self.cmd.output().expect("fxw runs");
        let finished = Finished { output };
        assert_eq!(
            finished.output.status.code(),
            Some(code),
            "unexpected exit\nstdout: {}\nstderr: {}",
            finished.stdout(),
            finished.stderr(),
        );
        finished
    }
}

/// A completed `fxw` run.
pub struct Finished {
    output: Output,
}

impl Finished {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout().as_str(), expected);
        self
    }

    pub fn stderr_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stderr().as_str(), expected);
        self
    }

    /// Parse stdout as the JSON completion record.
    pub fn record(&self) -> serde_json::Value {
        #[allow(clippy::expect_used)]
        serde_json::from_str(&self.stdout()).expect("stdout is a JSON record")
    }
}
