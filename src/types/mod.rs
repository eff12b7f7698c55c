//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction records, identifiers and directions
//! - `wallet`: Watch wallet, merchant wallet, connectivity and payment requests
//! - `state`: The whole snapshot tree
//! - `alert`: Transient user-facing alerts
//! - `command`: Commands issued by the device UIs
//! - `error`: Error types for the ledger and snapshot persistence

pub mod alert;
pub mod command;
pub mod error;
pub mod state;
pub mod transaction;
pub mod wallet;

pub use alert::{Alert, AlertKind};
pub use command::Command;
pub use error::{LedgerError, StoreError};
pub use state::LedgerState;
pub use transaction::{Transaction, TransactionId, TransactionKind};
pub use wallet::{Channel, Connectivity, MerchantWallet, PendingPaymentRequest, UserWallet};
