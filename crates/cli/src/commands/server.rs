// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sonar ping` and `sonar manual`: commands valid on any channel.

use anyhow::Result;
use clap::ValueEnum;
use sonar_client::{
    Channel, ChannelMode, ClientConfig, ClientError, ControlChannel, IngestChannel, SearchChannel,
};

use super::session;
use crate::output::{render_ping, render_text, OutputFormat, PingReport};

/// Channel to open for a mode-independent command.
#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum Mode {
    #[default]
    Search,
    Ingest,
    Control,
}

impl From<Mode> for ChannelMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Search => ChannelMode::Search,
            Mode::Ingest => ChannelMode::Ingest,
            Mode::Control => ChannelMode::Control,
        }
    }
}

fn open(config: &ClientConfig, mode: Mode) -> Result<Box<dyn Channel>, ClientError> {
    Ok(match ChannelMode::from(mode) {
        ChannelMode::Search => Box::new(SearchChannel::connect(config)?),
        ChannelMode::Ingest => Box::new(IngestChannel::connect(config)?),
        ChannelMode::Control => Box::new(ControlChannel::connect(config)?),
    })
}

pub fn ping(config: &ClientConfig, mode: Mode, format: OutputFormat) -> Result<()> {
    let mut channel = open(config, mode)?;
    let report = session(channel.as_mut(), |channel| {
        channel.ping()?;
        let handshake = channel.handshake();
        Ok(PingReport {
            mode: handshake.mode.to_string(),
            protocol: handshake.protocol,
            buffer: handshake.buffer,
            banner: channel.connection().banner().map(str::to_string),
        })
    })?;
    println!("{}", render_ping(&report, format)?);
    Ok(())
}

pub fn manual(
    config: &ClientConfig,
    mode: Mode,
    manual: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let mut channel = open(config, mode)?;
    let text = session(channel.as_mut(), |channel| Ok(channel.help(manual)?))?;
    println!("{}", render_text("help", &text, format)?);
    Ok(())
}
