// Facet query service
// One generic entry point replaces per-facet service classes: a facet
// binds fixed command text to a record shape, and the execution context
// decides how the raw payload is obtained. Mapping is identical across
// contexts.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::constants::DEFAULT_QUERY_TIMEOUT_SECS;
use super::payload;
use crate::error::Result;
use crate::port::{ScriptRunner, ScriptSession};

/// How a query obtains its raw payload
pub enum Execution<'a> {
    /// Fresh interpreter per call, default deadline
    OneShot { runner: &'a dyn ScriptRunner },
    /// Fresh interpreter per call, explicit deadline
    Bounded {
        runner: &'a dyn ScriptRunner,
        timeout_secs: i64,
    },
    /// Caller-owned persistent interpreter
    Session(&'a mut dyn ScriptSession),
}

/// One inventory facet: fixed command text bound to a record shape
pub struct FacetQuery<T> {
    name: String,
    command: String,
    _shape: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> FacetQuery<T> {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            _shape: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Fetch every record the facet query returns
    ///
    /// Order follows the payload; an empty payload is an empty vector,
    /// not an error.
    pub async fn all(&self, exec: Execution<'_>) -> Result<Vec<T>> {
        let raw = self.raw_payload(exec).await?;
        let records = payload::map_to_many(&raw)?;
        debug!(facet = %self.name, records = records.len(), "Facet query mapped");
        Ok(records)
    }

    /// Fetch at most one record (for facets that are singletons per host)
    pub async fn one(&self, exec: Execution<'_>) -> Result<Option<T>> {
        let raw = self.raw_payload(exec).await?;
        let record = payload::map_to_one(&raw)?;
        debug!(facet = %self.name, present = record.is_some(), "Facet query mapped");
        Ok(record)
    }

    async fn raw_payload(&self, exec: Execution<'_>) -> Result<String> {
        let raw = match exec {
            Execution::OneShot { runner } => {
                runner.run(&self.command, DEFAULT_QUERY_TIMEOUT_SECS).await?
            }
            Execution::Bounded {
                runner,
                timeout_secs,
            } => runner.run(&self.command, timeout_secs).await?,
            Execution::Session(session) => session.run(&self.command).await?,
        };
        Ok(raw)
    }
}
