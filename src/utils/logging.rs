//! Logging setup and per-module switchable logging macros.
//!
//! Modules that want to be able to silence their own diagnostics define a
//! module-level flag and use the crate-root macros instead of `log::*!`:
//!
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_debug, log_warn};
//!
//! log_warn!("stored read log is corrupt; starting empty");
//! ```
//!
//! Every macro tags the record with the calling module's path as its target,
//! so `RUST_LOG=readmeter_lib::access=debug` narrows output the usual way.

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialise `env_logger` once per process.
///
/// Defaults to `Info`; `RUST_LOG` takes precedence when set.
pub fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Info);
        if let Ok(spec) = std::env::var("RUST_LOG") {
            builder.parse_filters(&spec);
        }
        // A logger may already be installed by an embedding host.
        let _ = builder.try_init();
    });
}

/// Debug-level log gated on the caller's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::debug!(target: module_path!(), $($arg)*);
        }
    };
}

/// Info-level log gated on the caller's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!(target: module_path!(), $($arg)*);
        }
    };
}

/// Warn-level log gated on the caller's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!(target: module_path!(), $($arg)*);
        }
    };
}

/// Error-level log gated on the caller's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!(target: module_path!(), $($arg)*);
        }
    };
}
