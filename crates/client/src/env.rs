// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the client crate.

use std::path::PathBuf;
use std::time::Duration;

/// Server host override
pub fn host() -> Option<String> {
    std::env::var("SONAR_HOST").ok().filter(|s| !s.is_empty())
}

/// Server port override
pub fn port() -> Option<u16> {
    std::env::var("SONAR_PORT").ok().and_then(|s| s.parse::<u16>().ok())
}

/// Channel password (the server's `auth_password`).
pub fn password() -> Option<String> {
    std::env::var("SONAR_PASSWORD").ok().filter(|s| !s.is_empty())
}

/// Read/write timeout override in milliseconds (`SONAR_TIMEOUT_MS`).
pub fn timeout() -> Option<Duration> {
    std::env::var("SONAR_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Path to a TOML config file (`SONAR_CONFIG`).
pub fn config_path() -> Option<PathBuf> {
    std::env::var("SONAR_CONFIG").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}
