use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use anyhow::{bail, Result};

use super::ReadLogStore;

#[derive(Debug)]
struct MemoryState {
    items: HashMap<String, String>,
    available: bool,
    quota_bytes: Option<usize>,
}

/// In-process store, mainly for tests and embedding hosts without a disk.
///
/// Can be flipped to unavailable, or given a per-value byte quota, to mimic
/// disabled or full browser storage.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                items: HashMap::new(),
                available: true,
                quota_bytes: None,
            }),
        }
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        let store = Self::new();
        store.lock().quota_bytes = Some(quota_bytes);
        store
    }

    pub fn set_available(&self, available: bool) {
        self.lock().available = available;
    }

    /// Seed a raw value, bypassing availability and quota checks.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().items.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().items.get(key).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ReadLogStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let state = self.lock();
        if !state.available {
            bail!("memory store is unavailable");
        }
        Ok(state.items.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.lock();
        if !state.available {
            bail!("memory store is unavailable");
        }
        if let Some(quota) = state.quota_bytes {
            if value.len() > quota {
                bail!(
                    "value for '{key}' is {} bytes, quota is {quota}",
                    value.len()
                );
            }
        }
        state.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
