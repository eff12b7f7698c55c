//! FlashPay Ledger Library
//! # Overview
//!
//! This library provides the transaction state machine behind a three-device
//! payment demo: a phone UPI app, a smartwatch micro-wallet and a merchant
//! terminal, all sharing one state tree persisted as a single snapshot.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (wallets, transactions, alerts, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Pure state transitions over a snapshot
//!   - [`core::session`] - Snapshot replacement, persistence and alert expiry
//!   - [`core::config`] - Limits and display names
//! - [`io`] - Snapshot stores and CSV command scripts
//! - [`replay`] - Scripted replay of device commands
//!
//! # Operations
//!
//! - **Load funds**: Move money from the phone balance onto the watch (max 500 on the watch)
//! - **Request payment**: Merchant asks the watch for up to 200
//! - **Approve/decline**: The watch pays offline or cancels the request
//! - **Sync**: Merge offline watch payments into the confirmed history
//! - **Withdraw**: Move the merchant's collected balance to its bank
//!
//! # Offline Payments
//!
//! Watch payments land in `pending_sync` and count towards an offline limit
//! of 5. The merchant side records its credit immediately, so until the user
//! syncs, the merchant history contains payments the user history does not.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod replay;
pub mod types;

pub use core::{LedgerConfig, WalletLedger, WalletSession};
pub use io::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use types::{
    Alert, AlertKind, Channel, Command, LedgerError, LedgerState, MerchantWallet, StoreError,
    Transaction, TransactionId, TransactionKind, UserWallet,
};
