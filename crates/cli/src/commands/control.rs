// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sonar control`: server maintenance actions.

use anyhow::Result;
use clap::{Args, Subcommand};
use sonar_client::{ClientConfig, ControlChannel};

use super::session;
use crate::output::{render_ok, OutputFormat};

#[derive(Args)]
pub struct ControlArgs {
    #[command(subcommand)]
    pub command: ControlCommand,
}

#[derive(Subcommand)]
pub enum ControlCommand {
    /// Run a server action by name
    Trigger {
        action: String,
        /// Action argument, e.g. a backup path
        data: Option<String>,
    },
    /// Write pending index changes to disk
    Consolidate,
    /// Back up the index to a server-side path
    Backup { path: String },
    /// Restore the index from a server-side path
    Restore { path: String },
}

pub fn handle(command: ControlCommand, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let mut channel = ControlChannel::connect(config)?;

    let message = session(&mut channel, |channel| {
        Ok(match command {
            ControlCommand::Trigger { action, data } => {
                channel.trigger(&action, data.as_deref())?;
                format!("Triggered {action}")
            }
            ControlCommand::Consolidate => {
                channel.consolidate()?;
                "Consolidated".to_string()
            }
            ControlCommand::Backup { path } => {
                channel.backup(&path)?;
                format!("Backed up to {path}")
            }
            ControlCommand::Restore { path } => {
                channel.restore(&path)?;
                format!("Restored from {path}")
            }
        })
    })?;
    println!("{}", render_ok(&message, format)?);
    Ok(())
}
