//! Local storage port for the persisted read log.
//!
//! The meter never touches storage itself. Callers load the raw value, run
//! the pure decision, and hand the encoded result back to a [`ReadLogStore`].

use std::future::Future;

use anyhow::Result;
use serde::Serialize;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;

/// Key/value storage holding serialized read logs.
pub trait ReadLogStore: Send + Sync {
    /// Raw stored value for `key`, or `None` when nothing has been written.
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Overwrite the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;
}

/// What happened to the updated log after a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PersistOutcome {
    PersistedOk,
    /// The write failed; the decision only holds for the current render.
    PersistedUnavailable,
    /// Nothing needed writing (authenticated visitor or unusable article id).
    NotAttempted,
}

impl PersistOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersistOutcome::PersistedOk => "persisted",
            PersistOutcome::PersistedUnavailable => "unavailable",
            PersistOutcome::NotAttempted => "skipped",
        }
    }
}
