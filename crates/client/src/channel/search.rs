// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sonar_wire::{ChannelMode, Command, Verb};

use super::{identifier, results, text, Channel};
use crate::{ClientConfig, ClientError, Connection};

/// Optional modifiers for [`SearchChannel::query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// ISO 639-3 locale code, e.g. `eng`.
    pub lang: Option<String>,
}

impl QueryOptions {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Client for the search channel.
///
/// Both commands are deferred: the call blocks through `PENDING` until the
/// matching `EVENT` arrives.
pub struct SearchChannel {
    connection: Connection,
}

impl SearchChannel {
    pub fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        Connection::open(config, ChannelMode::Search).map(|connection| Self { connection })
    }

    /// Object identifiers matching `terms`, best first.
    pub fn query(
        &mut self,
        collection: &str,
        bucket: &str,
        terms: &str,
        options: &QueryOptions,
    ) -> Result<Vec<String>, ClientError> {
        identifier("collection", collection)?;
        identifier("bucket", bucket)?;
        text("terms", terms)?;
        if let Some(lang) = &options.lang {
            identifier("lang", lang)?;
        }

        let command = Command::new(Verb::Query)
            .word(collection)
            .word(bucket)
            .text(terms)
            .flag_opt("LIMIT", options.limit)
            .flag_opt("OFFSET", options.offset)
            .flag_opt("LANG", options.lang.as_deref());
        self.connection.call_with(command, results)
    }

    /// Completions for a word prefix.
    pub fn suggest(
        &mut self,
        collection: &str,
        bucket: &str,
        word: &str,
        limit: Option<u32>,
    ) -> Result<Vec<String>, ClientError> {
        identifier("collection", collection)?;
        identifier("bucket", bucket)?;
        text("word", word)?;

        let command = Command::new(Verb::Suggest)
            .word(collection)
            .word(bucket)
            .text(word)
            .flag_opt("LIMIT", limit);
        self.connection.call_with(command, results)
    }
}

impl Channel for SearchChannel {
    fn connection(&self) -> &Connection {
        &self.connection
    }

    fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
