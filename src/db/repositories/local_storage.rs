use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{helpers::parse_datetime, models::StoredItem, Database};

/// Largest value accepted for a single key (5 MiB, the usual browser quota).
pub const MAX_VALUE_BYTES: usize = 5 * 1024 * 1024;

fn row_to_item(row: &Row) -> Result<StoredItem> {
    let updated_at: String = row.get("updated_at")?;

    Ok(StoredItem {
        key: row.get("key")?,
        value: row.get("value")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    /// Raw value stored under `key`
    pub async fn get_item(&self, key: String) -> Result<Option<String>> {
        self.execute(move |conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM local_storage WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
        .await
    }

    /// Full record for `key`, including its last write time
    pub async fn get_item_record(&self, key: String) -> Result<Option<StoredItem>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT key, value, updated_at FROM local_storage WHERE key = ?1",
            )?;
            let mut rows = stmt.query(params![key])?;
            let item = match rows.next()? {
                Some(row) => Some(row_to_item(row)?),
                None => None,
            };
            Ok(item)
        })
        .await
    }

    /// Insert or overwrite the value under `key`
    pub async fn set_item(&self, key: String, value: String) -> Result<()> {
        if key.is_empty() {
            bail!("storage key is required");
        }
        if value.len() > MAX_VALUE_BYTES {
            bail!(
                "value for '{key}' is {} bytes, exceeding the {MAX_VALUE_BYTES} byte quota",
                value.len()
            );
        }

        self.execute(move |conn| {
            let updated = conn.execute(
                "INSERT INTO local_storage (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )?;
            if updated != 1 {
                return Err(anyhow!("expected one row written for '{key}', got {updated}"));
            }
            Ok(())
        })
        .await
    }

    /// Delete `key`; returns whether anything was removed
    pub async fn remove_item(&self, key: String) -> Result<bool> {
        self.execute(move |conn| {
            let removed = conn.execute(
                "DELETE FROM local_storage WHERE key = ?1",
                params![key],
            )?;
            Ok(removed > 0)
        })
        .await
    }

    /// All stored keys, most recently written first
    pub async fn list_keys(&self) -> Result<Vec<String>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT key FROM local_storage ORDER BY updated_at DESC, key ASC",
            )?;
            let keys = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(keys)
        })
        .await
    }
}
