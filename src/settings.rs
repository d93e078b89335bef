use anyhow::{bail, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::meter::{MeterPolicy, DEFAULT_FREE_LIMIT, STORAGE_KEY};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// Free-read policy as stored in `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeterSettings {
    pub free_limit: u32,
    pub retention_days: u32,
    pub storage_key: String,
}

impl Default for MeterSettings {
    fn default() -> Self {
        Self {
            free_limit: DEFAULT_FREE_LIMIT,
            retention_days: DEFAULT_RETENTION_DAYS,
            storage_key: STORAGE_KEY.into(),
        }
    }
}

impl MeterSettings {
    pub fn validate(&self) -> Result<()> {
        if self.retention_days == 0 {
            bail!("retentionDays must be at least 1");
        }
        if self.storage_key.trim().is_empty() {
            bail!("storageKey is required");
        }
        Ok(())
    }

    pub fn policy(&self) -> MeterPolicy {
        MeterPolicy::with_free_limit(self.free_limit)
            .with_retention(Duration::days(i64::from(self.retention_days)))
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<MeterSettings>,
}

impl SettingsStore {
    /// Load settings from `path`. A missing file or invalid contents yield
    /// defaults; an I/O error reading an existing file is returned.
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            parse_or_default(&contents, &path)
        } else {
            MeterSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn meter(&self) -> MeterSettings {
        self.read().clone()
    }

    pub fn update_meter(&self, settings: MeterSettings) -> Result<()> {
        settings.validate()?;
        let mut guard = self.write();
        self.persist(&settings)?;
        *guard = settings;
        Ok(())
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: MeterSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        data.validate()?;
        *self.write() = data;
        Ok(())
    }

    fn persist(&self, data: &MeterSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, MeterSettings> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, MeterSettings> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn parse_or_default(contents: &str, path: &Path) -> MeterSettings {
    match serde_json::from_str::<MeterSettings>(contents) {
        Ok(settings) if settings.validate().is_ok() => settings,
        Ok(_) | Err(_) => {
            log_warn!("Ignoring invalid settings in {}; using defaults", path.display());
            MeterSettings::default()
        }
    }
}
