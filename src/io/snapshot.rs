//! Snapshot encoding for the whole state tree
//!
//! Snapshots are JSON documents with the camelCase field names of the
//! state tree. Amounts are written as decimal strings; plain JSON numbers are
//! accepted when reading.

use crate::types::{LedgerState, StoreError};

/// Fixed key the state snapshot is stored under
pub const STORAGE_KEY: &str = "flashpay_prototype_state";

/// Encode a snapshot
pub fn encode_snapshot(state: &LedgerState) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Decode a snapshot
pub fn decode_snapshot(raw: &str) -> Result<LedgerState, StoreError> {
    Ok(serde_json::from_str(raw)?)
}
