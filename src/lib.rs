//! Anonymous free-read metering for a publishing client.
//!
//! Anonymous readers get a small number of distinct article reads per rolling
//! week before the article body is truncated behind a sign-up prompt. The
//! decision itself is the pure [`meter::should_gate`]; [`access::FreeReadGate`]
//! wires it to a [`storage::ReadLogStore`], and [`AppState`] opens the durable
//! SQLite store and settings file a host application runs against. The
//! `readmeter` binary is a thin wrapper over [`cli::run`].

pub mod access;
pub mod cli;
pub mod db;
pub mod meter;
pub mod publishing;
pub mod settings;
pub mod storage;
pub mod utils;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use access::FreeReadGate;
use db::Database;
use settings::{MeterSettings, SettingsStore};

pub use utils::init_logging;

const ENABLE_LOGS: bool = true;

pub const DATABASE_FILE: &str = "readmeter.sqlite3";
pub const SETTINGS_FILE: &str = "settings.json";

/// Everything one visitor profile needs: its local store and policy settings.
pub struct AppState {
    pub db: Database,
    pub settings: SettingsStore,
    data_dir: PathBuf,
}

impl AppState {
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let db = Database::new(data_dir.join(DATABASE_FILE))?;
        let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;

        log_info!("Profile ready in {}", data_dir.display());

        Ok(Self {
            db,
            settings,
            data_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Gate over this profile's store using the persisted settings.
    pub fn gate(&self) -> FreeReadGate<Database> {
        self.gate_with(self.settings.meter())
    }

    /// Gate using `settings` instead of the persisted ones.
    pub fn gate_with(&self, settings: MeterSettings) -> FreeReadGate<Database> {
        FreeReadGate::new(self.db.clone(), settings.policy())
            .with_storage_key(settings.storage_key)
    }
}
