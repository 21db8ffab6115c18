// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection settings: defaults, TOML file, environment overrides.
//!
//! ```toml
//! host = "search.internal"
//! port = 1491
//! password = "SecretPassword"
//! connect_timeout_ms = 5000
//! read_timeout_ms = 10000
//! write_timeout_ms = 10000
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::{env, ClientError, Timeouts};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 1491;
pub const DEFAULT_PASSWORD: &str = "SecretPassword";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub timeouts: Timeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: DEFAULT_PASSWORD.to_string(),
            timeouts: Timeouts::default(),
        }
    }
}

// Password stays out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// On-disk form. Every field is optional and falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    host: Option<String>,
    port: Option<u16>,
    password: Option<String>,
    connect_timeout_ms: Option<u64>,
    read_timeout_ms: Option<u64>,
    write_timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Parse a TOML document over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ClientError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ClientError::Config(e.to_string()))?;
        let defaults = Self::default();
        Ok(Self {
            host: file.host.unwrap_or(defaults.host),
            port: file.port.unwrap_or(defaults.port),
            password: file.password.unwrap_or(defaults.password),
            timeouts: Timeouts {
                connect: file
                    .connect_timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.timeouts.connect),
                read: file
                    .read_timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.timeouts.read),
                write: file
                    .write_timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.timeouts.write),
            },
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ClientError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the file named by `SONAR_CONFIG`, then `SONAR_*` overrides.
    pub fn load() -> Result<Self, ClientError> {
        let mut config = match env::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Overlay `SONAR_HOST`, `SONAR_PORT`, `SONAR_PASSWORD` and `SONAR_TIMEOUT_MS`.
    pub fn apply_env(&mut self) {
        if let Some(host) = env::host() {
            self.host = host;
        }
        if let Some(port) = env::port() {
            self.port = port;
        }
        if let Some(password) = env::password() {
            self.password = password;
        }
        if let Some(timeout) = env::timeout() {
            self.timeouts.read = timeout;
            self.timeouts.write = timeout;
        }
    }

    /// Use one deadline for both reads and writes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.read = timeout;
        self.timeouts.write = timeout;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
