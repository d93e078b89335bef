//! Anonymous free-read metering.
//!
//! The meter is a pure decision over an explicit [`ReadLog`] value. Reading
//! and writing the persisted log is the caller's job; see
//! [`crate::access::FreeReadGate`] for the orchestrated version.

pub mod codec;
pub mod entry;
pub mod gate;
pub mod policy;

pub use codec::{decode_log, encode_log};
pub use entry::{ReadEntry, ReadLog};
pub use gate::{should_gate, GateDecision};
pub use policy::{MeterPolicy, DEFAULT_FREE_LIMIT, RETENTION_WINDOW_MS, STORAGE_KEY};
