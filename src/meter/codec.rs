//! Lenient decoding of the persisted read log.
//!
//! Stored state is untrusted: it may have been written by an older client,
//! edited by hand, or truncated by a quota error. Anything that does not look
//! like `[{ "id": string, "ts": number }, ...]` is discarded entry by entry,
//! and a value that is not an array at all decodes to an empty log.

use anyhow::{Context, Result};
use serde_json::Value;

use super::entry::{ReadEntry, ReadLog};

const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Decode a stored read log. Never fails; bad input yields an empty log.
pub fn decode_log(raw: Option<&str>) -> ReadLog {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return ReadLog::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode_value(&value),
        Err(err) => {
            log_debug!("stored read log is not valid JSON: {err}");
            ReadLog::new()
        }
    }
}

/// Decode an already-parsed JSON value.
pub fn decode_value(value: &Value) -> ReadLog {
    let Value::Array(items) = value else {
        log_debug!("stored read log is not an array");
        return ReadLog::new();
    };

    let total = items.len();
    let log = ReadLog::from_entries(items.iter().filter_map(decode_entry));
    if log.len() < total {
        log_debug!("dropped {} invalid or duplicate read entries", total - log.len());
    }
    log
}

/// Serialize a log in the persisted `{id, ts}` layout.
pub fn encode_log(log: &ReadLog) -> Result<String> {
    serde_json::to_string(log).context("failed to serialize read log")
}

fn decode_entry(item: &Value) -> Option<ReadEntry> {
    let object = item.as_object()?;
    let article_id = match object.get("id")? {
        Value::String(id) if !id.is_empty() => id.clone(),
        Value::Number(id) => id.to_string(),
        _ => return None,
    };
    let observed_at_millis = decode_timestamp(object.get("ts")?)?;
    Some(ReadEntry::new(article_id, observed_at_millis))
}

fn decode_timestamp(value: &Value) -> Option<i64> {
    match value {
        // Numbers keep their source text, so literals beyond f64 range parse
        // to infinity here and only this entry is rejected.
        Value::Number(n) => match n.as_i64() {
            Some(millis) => Some(millis),
            None => finite_millis(n.to_string().parse().ok()?),
        },
        Value::String(s) => finite_millis(s.trim().parse().ok()?),
        _ => None,
    }
}

fn finite_millis(millis: f64) -> Option<i64> {
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(millis.trunc() as i64)
}
