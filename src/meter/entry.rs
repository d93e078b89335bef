use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One distinct-article read recorded for an anonymous visitor.
///
/// Serialized as `{ "id": ..., "ts": ... }` to stay compatible with the
/// persisted layout written by earlier clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEntry {
    #[serde(rename = "id")]
    pub article_id: String,
    #[serde(rename = "ts")]
    pub observed_at_millis: i64,
}

impl ReadEntry {
    pub fn new(article_id: impl Into<String>, observed_at_millis: i64) -> Self {
        Self {
            article_id: article_id.into(),
            observed_at_millis,
        }
    }
}

/// Most-recent-first list of reads, holding at most one entry per article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadLog {
    entries: Vec<ReadEntry>,
}

impl ReadLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from entries in stored order.
    ///
    /// Later duplicates of an article id are dropped so the first-seen entry
    /// (and its timestamp) wins.
    pub fn from_entries(entries: impl IntoIterator<Item = ReadEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|entry| seen.insert(entry.article_id.clone()))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ReadEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ReadEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, article_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.article_id == article_id)
    }

    pub fn get(&self, article_id: &str) -> Option<&ReadEntry> {
        self.entries.iter().find(|entry| entry.article_id == article_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReadEntry> {
        self.entries.iter()
    }

    /// Drop every entry observed at or before `horizon_millis`.
    pub(crate) fn retain_newer_than(&mut self, horizon_millis: i64) {
        self.entries
            .retain(|entry| entry.observed_at_millis > horizon_millis);
    }

    /// Record a first read of `article_id` at the head of the log.
    ///
    /// Returns `false` when the article is already present; its original
    /// timestamp is left alone.
    pub(crate) fn record_first_read(&mut self, article_id: &str, observed_at_millis: i64) -> bool {
        if self.contains(article_id) {
            return false;
        }
        self.entries
            .insert(0, ReadEntry::new(article_id, observed_at_millis));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_keeps_first_duplicate() {
        let log = ReadLog::from_entries(vec![
            ReadEntry::new("a", 30),
            ReadEntry::new("b", 20),
            ReadEntry::new("a", 10),
        ]);

        assert_eq!(log.len(), 2);
        assert_eq!(log.get("a").map(|e| e.observed_at_millis), Some(30));
    }

    #[test]
    fn record_first_read_prepends_once() {
        let mut log = ReadLog::from_entries(vec![ReadEntry::new("a", 1)]);

        assert!(log.record_first_read("b", 2));
        assert!(!log.record_first_read("a", 3));

        let ids: Vec<_> = log.iter().map(|e| e.article_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(log.get("a").map(|e| e.observed_at_millis), Some(1));
    }

    #[test]
    fn serializes_with_short_field_names() {
        let log = ReadLog::from_entries(vec![ReadEntry::new("post-1", 42)]);
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(json, r#"[{"id":"post-1","ts":42}]"#);
    }
}
