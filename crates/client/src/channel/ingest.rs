// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use sonar_wire::{ChannelMode, Command, Response, Verb};

use super::{count, identifier, text, Channel};
use crate::{ClientConfig, ClientError, Connection};

/// Client for the ingest channel: index and unindex text, count, flush.
pub struct IngestChannel {
    connection: Connection,
}

impl IngestChannel {
    pub fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        Connection::open(config, ChannelMode::Ingest).map(|connection| Self { connection })
    }

    /// Index `text` under `collection/bucket/object`.
    pub fn push(
        &mut self,
        collection: &str,
        bucket: &str,
        object: &str,
        body: &str,
        lang: Option<&str>,
    ) -> Result<(), ClientError> {
        identifier("collection", collection)?;
        identifier("bucket", bucket)?;
        identifier("object", object)?;
        text("text", body)?;
        if let Some(lang) = lang {
            identifier("lang", lang)?;
        }

        let command = Command::new(Verb::Push)
            .word(collection)
            .word(bucket)
            .word(object)
            .text(body)
            .flag_opt("LANG", lang);
        self.connection.call_with(command, |reply| matches!(reply, Response::Ok(_)).then_some(()))
    }

    /// Unindex `text` from an object. Returns how many terms were removed.
    pub fn pop(
        &mut self,
        collection: &str,
        bucket: &str,
        object: &str,
        body: &str,
    ) -> Result<u64, ClientError> {
        identifier("collection", collection)?;
        identifier("bucket", bucket)?;
        identifier("object", object)?;
        text("text", body)?;

        let command =
            Command::new(Verb::Pop).word(collection).word(bucket).word(object).text(body);
        self.connection.call_with(command, count)
    }

    /// Count indexed items at collection, bucket or object level.
    pub fn count(
        &mut self,
        collection: &str,
        bucket: Option<&str>,
        object: Option<&str>,
    ) -> Result<u64, ClientError> {
        let command = scoped(Verb::Count, collection, bucket, object)?;
        self.connection.call_with(command, count)
    }

    pub fn flushc(&mut self, collection: &str) -> Result<u64, ClientError> {
        self.flush(collection, None, None)
    }

    pub fn flushb(&mut self, collection: &str, bucket: &str) -> Result<u64, ClientError> {
        self.flush(collection, Some(bucket), None)
    }

    pub fn flusho(
        &mut self,
        collection: &str,
        bucket: &str,
        object: &str,
    ) -> Result<u64, ClientError> {
        self.flush(collection, Some(bucket), Some(object))
    }

    /// Flush at the narrowest level given: `FLUSHC`, `FLUSHB` or `FLUSHO`.
    pub fn flush(
        &mut self,
        collection: &str,
        bucket: Option<&str>,
        object: Option<&str>,
    ) -> Result<u64, ClientError> {
        let verb = match (bucket, object) {
            (None, _) => Verb::FlushCollection,
            (Some(_), None) => Verb::FlushBucket,
            (Some(_), Some(_)) => Verb::FlushObject,
        };
        let command = scoped(verb, collection, bucket, object)?;
        self.connection.call_with(command, count)
    }
}

/// Build `VERB <collection> [<bucket> [<object>]]`.
fn scoped(
    verb: Verb,
    collection: &str,
    bucket: Option<&str>,
    object: Option<&str>,
) -> Result<Command, ClientError> {
    identifier("collection", collection)?;
    if let Some(bucket) = bucket {
        identifier("bucket", bucket)?;
    }
    match (bucket, object) {
        (None, Some(_)) => {
            let reason = format!("{verb} with an object needs a bucket");
            return Err(ClientError::InvalidArgument(reason));
        }
        (_, Some(object)) => identifier("object", object)?,
        _ => {}
    }
    Ok(Command::new(verb).word(collection).word_opt(bucket).word_opt(object))
}

impl Channel for IngestChannel {
    fn connection(&self) -> &Connection {
        &self.connection
    }

    fn connection_mut(&mut self) -> &mut Connection {
        &mut self.connection
    }
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
