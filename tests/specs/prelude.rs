// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.
//!
//! ```ignore
//! cli().args(&["search", "query", "wiki", "articles", "love"])
//!     .against(&server)
//!     .passes()
//!     .stdout_has("article-1");
//! ```

pub use sonar_client::test_support::{Script, ScriptedServer};
pub use sonar_client::ChannelMode;

pub const PASSWORD: &str = "SecretPassword";

const CLEARED_ENV: [&str; 6] =
    ["SONAR_HOST", "SONAR_PORT", "SONAR_PASSWORD", "SONAR_TIMEOUT_MS", "SONAR_CONFIG", "SONAR_LOG"];

/// A `sonar` invocation isolated from the caller's environment.
pub fn cli() -> Cli {
    let mut cmd = assert_cmd::Command::cargo_bin("sonar")
        .unwrap_or_else(|e| panic!("sonar binary not built: {e}"));
    for var in CLEARED_ENV {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    Cli { cmd }
}

/// Spawn a server that completes the handshake for `mode`, runs `script`,
/// and then answers the client's closing `QUIT`.
pub fn server(mode: ChannelMode, script: Script) -> ScriptedServer {
    let script = Script::new()
        .handshake(mode, PASSWORD)
        .extend(script)
        .expect("QUIT")
        .send("ENDED quit");
    ScriptedServer::spawn(script)
        .unwrap_or_else(|e| panic!("cannot spawn scripted server: {e}"))
}

pub struct Cli {
    cmd: assert_cmd::Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Point the invocation at `server` with its password.
    pub fn against(self, server: &ScriptedServer) -> Self {
        let port = server.port().to_string();
        self.args(&["--host", &server.host(), "--port", &port, "--password", PASSWORD])
    }

    pub fn passes(mut self) -> Output {
        let output = Output::from(self.cmd.output());
        assert!(
            output.code == Some(0),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            output.code,
            output.stdout,
            output.stderr
        );
        output
    }

    pub fn fails_with(mut self, code: i32) -> Output {
        let output = Output::from(self.cmd.output());
        assert!(
            output.code == Some(code),
            "expected exit {code}, got {:?}\nstdout:\n{}\nstderr:\n{}",
            output.code,
            output.stdout,
            output.stderr
        );
        output
    }
}

pub struct Output {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::io::Result<std::process::Output>> for Output {
    fn from(result: std::io::Result<std::process::Output>) -> Self {
        let output = result.unwrap_or_else(|e| panic!("cannot run sonar: {e}"));
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout.as_str(), expected);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// Finish `server` and assert it saw exactly `lines` between the handshake
/// and the closing `QUIT`.
pub fn assert_received(server: ScriptedServer, lines: &[&str]) {
    let transcript = server.finish();
    assert!(transcript.is_clean(), "server mismatches: {:?}", transcript.mismatches);
    let after_start: Vec<&str> = transcript.received.iter().skip(1).map(String::as_str).collect();
    let mut expected = lines.to_vec();
    expected.push("QUIT");
    similar_asserts::assert_eq!(after_start, expected);
}
