// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sonar search`: query and suggest.

use anyhow::Result;
use clap::{Args, Subcommand};
use sonar_client::{ClientConfig, QueryOptions, SearchChannel};

use super::session;
use crate::output::{render_list, OutputFormat};

#[derive(Args)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Subcommand)]
pub enum SearchCommand {
    /// Find objects matching the given terms
    Query {
        collection: String,
        bucket: String,
        terms: String,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,
        /// Number of results to skip
        #[arg(long)]
        offset: Option<u32>,
        /// ISO 639-3 locale of the terms (e.g. eng)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Complete a word prefix
    Suggest {
        collection: String,
        bucket: String,
        word: String,
        /// Maximum number of suggestions
        #[arg(long)]
        limit: Option<u32>,
    },
}

pub fn handle(command: SearchCommand, config: &ClientConfig, format: OutputFormat) -> Result<()> {
    let mut channel = SearchChannel::connect(config)?;

    let rendered = session(&mut channel, |channel| {
        Ok(match command {
            SearchCommand::Query { collection, bucket, terms, limit, offset, lang } => {
                let options = QueryOptions { limit, offset, lang };
                let hits = channel.query(&collection, &bucket, &terms, &options)?;
                render_list(&hits, "results", format)?
            }
            SearchCommand::Suggest { collection, bucket, word, limit } => {
                let words = channel.suggest(&collection, &bucket, &word, limit)?;
                render_list(&words, "suggestions", format)?
            }
        })
    })?;
    println!("{rendered}");
    Ok(())
}
