use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    meter::{decode_log, encode_log, gate::is_valid_article_id, MeterPolicy, ReadLog, STORAGE_KEY},
    storage::{PersistOutcome, ReadLogStore},
};

use super::view::GateView;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_warn};

/// Result of gating one article view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateOutcome {
    pub article_id: String,
    pub blocked: bool,
    /// Distinct unexpired reads after this view; zero when not metered.
    pub reads_counted: usize,
    pub free_limit: u32,
    pub persisted: PersistOutcome,
    pub view: GateView,
}

impl GateOutcome {
    pub fn remaining_free_reads(&self) -> u32 {
        let counted = u32::try_from(self.reads_counted).unwrap_or(u32::MAX);
        self.free_limit.saturating_sub(counted)
    }
}

/// Wires a local store to the pure meter for a single visitor profile.
///
/// Storage errors never reach the caller: a failed load meters against an
/// empty log and a failed save only loses durability.
pub struct FreeReadGate<S> {
    store: S,
    policy: MeterPolicy,
    storage_key: String,
}

impl<S: ReadLogStore> FreeReadGate<S> {
    pub fn new(store: S, policy: MeterPolicy) -> Self {
        Self {
            store,
            policy,
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &MeterPolicy {
        &self.policy
    }

    pub async fn check(
        &self,
        article_id: &str,
        is_authenticated: bool,
        now: DateTime<Utc>,
    ) -> GateOutcome {
        if is_authenticated || !is_valid_article_id(article_id) {
            if !is_authenticated {
                log_debug!("Not metering view with blank article id");
            }
            return self.unmetered(article_id);
        }

        let log = self.load_log().await;
        let decision = self
            .policy
            .evaluate(log, article_id, is_authenticated, now);
        let persisted = self.persist(&decision.updated_log).await;

        GateOutcome {
            article_id: article_id.to_string(),
            blocked: decision.blocked,
            reads_counted: decision.updated_log.len(),
            free_limit: self.policy.free_limit,
            persisted,
            view: GateView::for_decision(article_id, decision.blocked),
        }
    }

    /// Unexpired reads as of `now`, without recording anything.
    pub async fn current_log(&self, now: DateTime<Utc>) -> ReadLog {
        let horizon = self.policy.horizon_millis(now.timestamp_millis());
        let entries = self
            .load_log()
            .await
            .into_entries()
            .into_iter()
            .filter(|entry| entry.observed_at_millis > horizon);
        ReadLog::from_entries(entries)
    }

    /// Forget every recorded read for this profile.
    pub async fn reset(&self) -> PersistOutcome {
        self.persist(&ReadLog::new()).await
    }

    async fn load_log(&self) -> ReadLog {
        match self.store.load(&self.storage_key).await {
            Ok(raw) => decode_log(raw.as_deref()),
            Err(err) => {
                log_warn!("Read log unavailable, metering against an empty log: {err:#}");
                ReadLog::new()
            }
        }
    }

    async fn persist(&self, log: &ReadLog) -> PersistOutcome {
        let encoded = match encode_log(log) {
            Ok(encoded) => encoded,
            Err(err) => {
                log_warn!("Skipping read log write: {err:#}");
                return PersistOutcome::PersistedUnavailable;
            }
        };

        match self.store.save(&self.storage_key, &encoded).await {
            Ok(()) => PersistOutcome::PersistedOk,
            Err(err) => {
                log_warn!("Read log write failed; decision holds for this view only: {err:#}");
                PersistOutcome::PersistedUnavailable
            }
        }
    }

    fn unmetered(&self, article_id: &str) -> GateOutcome {
        GateOutcome {
            article_id: article_id.to_string(),
            blocked: false,
            reads_counted: 0,
            free_limit: self.policy.free_limit,
            persisted: PersistOutcome::NotAttempted,
            view: GateView::Full,
        }
    }
}
