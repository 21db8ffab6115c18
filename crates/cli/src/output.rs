// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Channel parameters reported by `sonar ping`.
#[derive(Debug, Clone, Serialize)]
pub struct PingReport {
    pub mode: String,
    pub protocol: u32,
    pub buffer: usize,
    pub banner: Option<String>,
}

/// Render object ids or words, one per line in text mode.
///
/// - `noun` — plural shown when the list is empty, e.g. `"results"`.
pub fn render_list(items: &[String], noun: &str, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text if items.is_empty() => Ok(color::muted(&format!("No {noun}"))),
        OutputFormat::Text => Ok(items.join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
    }
}

/// Render a `RESULT` count under `key`.
pub fn render_count(key: &str, value: u64, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => {
            let mut obj = serde_json::Map::new();
            obj.insert(key.to_string(), value.into());
            Ok(serde_json::to_string_pretty(&obj)?)
        }
    }
}

/// Render an acknowledgment with no payload.
pub fn render_ok(message: &str, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(message.to_string()),
        OutputFormat::Json => {
            Ok(serde_json::to_string_pretty(&serde_json::json!({ "status": "ok" }))?)
        }
    }
}

/// Render free text returned by the server, e.g. `HELP` output.
pub fn render_text(key: &str, text: &str, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(text.to_string()),
        OutputFormat::Json => {
            let mut obj = serde_json::Map::new();
            obj.insert(key.to_string(), text.into());
            Ok(serde_json::to_string_pretty(&obj)?)
        }
    }
}

pub fn render_ping(report: &PingReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{} {} channel, protocol {}, buffer {}",
            color::header("PONG"),
            report.mode,
            report.protocol,
            report.buffer
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
