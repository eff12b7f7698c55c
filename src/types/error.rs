//! Error types for the FlashPay ledger
//!
//! This module defines the rejections a ledger operation can produce and the
//! errors raised while loading or saving state snapshots.
//!
//! # Error Categories
//!
//! - **Ledger rejections** (`LedgerError`): a precondition of the operation
//!   failed. The state is left untouched and the error is shown to the user
//!   as a transient alert. None of them are fatal.
//! - **Persistence errors** (`StoreError`): the snapshot store could not be
//!   read or written, or a snapshot could not be encoded.

use super::alert::Alert;
use rust_decimal::Decimal;
use thiserror::Error;

/// Rejection of a single ledger operation
///
/// Silent no-ops (out-of-range amounts, empty withdrawals, ...) are not
/// errors; see `core::ledger::IgnoreReason`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The watch is switched off
    #[error("Watch is inactive")]
    WatchInactive,

    /// Reloading the watch needs both Bluetooth and Wi-Fi
    #[error("Cannot reach the watch: bluetooth {bluetooth}, wifi {wifi}")]
    SyncError {
        /// Bluetooth state at the time of the request
        bluetooth: bool,
        /// Wi-Fi state at the time of the request
        wifi: bool,
    },

    /// Loading would push the watch balance over its limit
    #[error("Watch limit reached: balance {balance} + {requested} exceeds {limit}")]
    LimitReached {
        /// Current watch balance
        balance: Decimal,
        /// Requested load amount
        requested: Decimal,
        /// Watch wallet limit
        limit: Decimal,
    },

    /// The phone/bank account cannot cover the load
    #[error("Insufficient bank funds: available {available}, requested {requested}")]
    InsufficientBankFunds {
        /// Phone balance
        available: Decimal,
        /// Requested load amount
        requested: Decimal,
    },

    /// The watch balance cannot cover the pending payment
    #[error("Low watch balance: available {available}, requested {requested}")]
    LowBalance {
        /// Watch balance
        available: Decimal,
        /// Requested payment amount
        requested: Decimal,
    },

    /// Too many offline payments since the last sync
    #[error("Sync required: {offline_count} offline payments (limit {limit})")]
    SyncRequired {
        /// Offline payments since the last sync
        offline_count: u32,
        /// Offline payment limit
        limit: u32,
    },

    /// Syncing needs Bluetooth
    #[error("Sync failed: bluetooth is off")]
    SyncFailed,

    /// A balance update would overflow
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },
}

impl LedgerError {
    /// Create a SyncError error
    pub fn sync_error(bluetooth: bool, wifi: bool) -> Self {
        LedgerError::SyncError { bluetooth, wifi }
    }

    /// Create a LimitReached error
    pub fn limit_reached(balance: Decimal, requested: Decimal, limit: Decimal) -> Self {
        LedgerError::LimitReached {
            balance,
            requested,
            limit,
        }
    }

    /// Create an InsufficientBankFunds error
    pub fn insufficient_bank_funds(available: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientBankFunds {
            available,
            requested,
        }
    }

    /// Create a LowBalance error
    pub fn low_balance(available: Decimal, requested: Decimal) -> Self {
        LedgerError::LowBalance {
            available,
            requested,
        }
    }

    /// Create a SyncRequired error
    pub fn sync_required(offline_count: u32, limit: u32) -> Self {
        LedgerError::SyncRequired {
            offline_count,
            limit,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Short text shown on the watch face for this rejection
    pub fn alert_message(&self) -> &'static str {
        match self {
            LedgerError::WatchInactive => "WATCH INACTIVE",
            LedgerError::SyncError { .. } => "SYNC ERROR",
            LedgerError::LimitReached { .. } => "LIMIT REACHED",
            LedgerError::InsufficientBankFunds { .. } => "LOW BANK BAL",
            LedgerError::LowBalance { .. } => "LOW BALANCE",
            LedgerError::SyncRequired { .. } => "SYNC REQUIRED",
            LedgerError::SyncFailed => "SYNC FAILED",
            LedgerError::ArithmeticOverflow { .. } => "TXN FAILED",
        }
    }

    /// The error alert surfaced to the invoking device
    pub fn alert(&self) -> Alert {
        Alert::error(self.alert_message())
    }
}

/// Snapshot persistence error
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be read or written
    #[error("I/O error on snapshot '{key}': {source}")]
    Io {
        /// Snapshot key
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The state could not be encoded or decoded
    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create an Io error
    pub fn io(key: &str, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AlertKind;
    use rstest::rstest;

    #[rstest]
    #[case::watch_inactive(LedgerError::WatchInactive, "Watch is inactive")]
    #[case::sync_error(
        LedgerError::sync_error(true, false),
        "Cannot reach the watch: bluetooth true, wifi false"
    )]
    #[case::limit_reached(
        LedgerError::limit_reached(Decimal::from(400), Decimal::from(200), Decimal::from(500)),
        "Watch limit reached: balance 400 + 200 exceeds 500"
    )]
    #[case::insufficient_bank_funds(
        LedgerError::insufficient_bank_funds(Decimal::from(50), Decimal::from(100)),
        "Insufficient bank funds: available 50, requested 100"
    )]
    #[case::low_balance(
        LedgerError::low_balance(Decimal::from(20), Decimal::from(150)),
        "Low watch balance: available 20, requested 150"
    )]
    #[case::sync_required(
        LedgerError::sync_required(5, 5),
        "Sync required: 5 offline payments (limit 5)"
    )]
    #[case::sync_failed(LedgerError::SyncFailed, "Sync failed: bluetooth is off")]
    #[case::arithmetic_overflow(
        LedgerError::arithmetic_overflow("load_funds"),
        "Arithmetic overflow in load_funds"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::watch_inactive(LedgerError::WatchInactive, "WATCH INACTIVE")]
    #[case::sync_error(LedgerError::sync_error(false, false), "SYNC ERROR")]
    #[case::limit_reached(
        LedgerError::limit_reached(Decimal::from(400), Decimal::from(200), Decimal::from(500)),
        "LIMIT REACHED"
    )]
    #[case::insufficient_bank_funds(
        LedgerError::insufficient_bank_funds(Decimal::ZERO, Decimal::ONE),
        "LOW BANK BAL"
    )]
    #[case::low_balance(LedgerError::low_balance(Decimal::ZERO, Decimal::ONE), "LOW BALANCE")]
    #[case::sync_required(LedgerError::sync_required(5, 5), "SYNC REQUIRED")]
    #[case::sync_failed(LedgerError::SyncFailed, "SYNC FAILED")]
    #[case::arithmetic_overflow(LedgerError::arithmetic_overflow("process_payment"), "TXN FAILED")]
    fn test_alert_messages(#[case] error: LedgerError, #[case] expected: &str) {
        let alert = error.alert();
        assert_eq!(alert.message, expected);
        assert_eq!(alert.kind, AlertKind::Error);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error = StoreError::io("flashpay_prototype_state", io_error);
        assert!(matches!(error, StoreError::Io { .. }));
        assert_eq!(
            error.to_string(),
            "I/O error on snapshot 'flashpay_prototype_state': Permission denied"
        );
    }
}
