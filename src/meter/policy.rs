use chrono::Duration;

/// Distinct articles an anonymous visitor may open before the gate closes.
pub const DEFAULT_FREE_LIMIT: u32 = 3;

/// Reads older than this stop counting (7 days).
pub const RETENTION_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Fixed local-storage key holding the serialized read log.
pub const STORAGE_KEY: &str = "newsblogs_free_reads_v1";

/// Runtime metering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeterPolicy {
    pub free_limit: u32,
    pub retention: Duration,
}

impl Default for MeterPolicy {
    fn default() -> Self {
        Self {
            free_limit: DEFAULT_FREE_LIMIT,
            retention: Duration::milliseconds(RETENTION_WINDOW_MS),
        }
    }
}

impl MeterPolicy {
    /// Policy with the standard 7 day retention window.
    pub fn with_free_limit(free_limit: u32) -> Self {
        Self {
            free_limit,
            ..Self::default()
        }
    }

    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    /// Reads observed at or before this instant have expired.
    pub fn horizon_millis(&self, now_millis: i64) -> i64 {
        now_millis.saturating_sub(self.retention.num_milliseconds())
    }
}
