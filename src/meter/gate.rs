use chrono::{DateTime, Utc};

use super::{entry::ReadLog, policy::MeterPolicy};

/// Outcome of metering one article view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    /// Log to persist back in place of the one passed in.
    pub updated_log: ReadLog,
    pub blocked: bool,
}

impl GateDecision {
    fn open(log: ReadLog) -> Self {
        Self {
            updated_log: log,
            blocked: false,
        }
    }
}

/// Meter a single article view with the default 7 day retention window.
///
/// Authenticated visitors and blank article ids are passed through untouched
/// and never blocked.
pub fn should_gate(
    visitor_log: ReadLog,
    article_id: &str,
    is_authenticated: bool,
    free_limit: u32,
    now: DateTime<Utc>,
) -> GateDecision {
    MeterPolicy::with_free_limit(free_limit).evaluate(
        visitor_log,
        article_id,
        is_authenticated,
        now,
    )
}

impl MeterPolicy {
    /// Meter a single article view under this policy.
    ///
    /// Expired reads are dropped from the returned log, an unseen article is
    /// prepended at `now`, and the view is blocked once the surviving count
    /// exceeds `free_limit`. A re-read keeps its first-seen timestamp.
    pub fn evaluate(
        &self,
        visitor_log: ReadLog,
        article_id: &str,
        is_authenticated: bool,
        now: DateTime<Utc>,
    ) -> GateDecision {
        if is_authenticated || !is_valid_article_id(article_id) {
            return GateDecision::open(visitor_log);
        }

        let now_millis = now.timestamp_millis();
        let mut log = visitor_log;
        log.retain_newer_than(self.horizon_millis(now_millis));
        log.record_first_read(article_id, now_millis);

        let blocked = log.len() > self.free_limit as usize;
        GateDecision {
            updated_log: log,
            blocked,
        }
    }
}

pub fn is_valid_article_id(article_id: &str) -> bool {
    !article_id.trim().is_empty()
}
