//! Row model for the `local_storage` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw key/value record with its last write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
