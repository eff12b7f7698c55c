//! I/O module
//!
//! Handles snapshot persistence and scripted command input.
//!
//! # Components
//!
//! - `snapshot` - JSON encoding of the whole state tree
//! - `store` - Key/value stores the snapshot is persisted to
//! - `script` - CSV command scripts and balance summary output

pub mod script;
pub mod snapshot;
pub mod store;

pub use script::{convert_script_record, write_summary_csv, ScriptReader, ScriptRecord};
pub use snapshot::{decode_snapshot, encode_snapshot, STORAGE_KEY};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
