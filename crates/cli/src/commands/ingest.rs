// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sonar ingest`: index, unindex, count and flush.

use anyhow::Result;
use clap::{Args, Subcommand};
use sonar_client::{ClientConfig, IngestChannel};

use super::session;
use crate::output::{render_count, render_ok, OutputFormat};

#[derive(Args)]
pub struct IngestArgs {
    #[command(subcommand)]
    pub command: IngestCommand,
}

#[derive(Subcommand)]
pub enum IngestCommand {
    /// Index text under an object
    Push {
        collection: String,
        bucket: String,
        object: String,
        text: String,
        /// ISO 639-3 locale of the text (e.g. eng)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Remove text from an object's index
    Pop { collection: String, bucket: String, object: String, text: String },
    /// Count indexed items in a collection, bucket or object
    Count { collection: String, bucket: Option<String>, object: Option<String> },
    /// Flush a collection, bucket or object
    Flush { collection: String, bucket: Option<String>, object: Option<String> },
}

pub fn handle(command: IngestCommand, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let mut channel = IngestChannel::connect(config)?;

    let rendered = session(&mut channel, |channel| {
        Ok(match command {
            IngestCommand::Push { collection, bucket, object, text, lang } => {
                channel.push(&collection, &bucket, &object, &text, lang.as_deref())?;
                render_ok(&format!("Pushed to {collection}/{bucket}/{object}"), format)?
            }
            IngestCommand::Pop { collection, bucket, object, text } => {
                let removed = channel.pop(&collection, &bucket, &object, &text)?;
                render_count("removed", removed, format)?
            }
            IngestCommand::Count { collection, bucket, object } => {
                let count = channel.count(&collection, bucket.as_deref(), object.as_deref())?;
                render_count("count", count, format)?
            }
            IngestCommand::Flush { collection, bucket, object } => {
                let flushed = channel.flush(&collection, bucket.as_deref(), object.as_deref())?;
                render_count("flushed", flushed, format)?
            }
        })
    })?;
    println!("{rendered}");
    Ok(())
}
