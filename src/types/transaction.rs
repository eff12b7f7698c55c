//! Transaction-related types for the FlashPay ledger
//!
//! This module defines the transaction record shared by the watch wallet and
//! the merchant wallet, along with its identifier and direction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction identifier
///
/// Load transactions look like `TXN-LOAD-7K2M9QX0A`, payments like
/// `TXN-7K2M9QX0A`. The paired debit and credit of one payment share the
/// same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap an already formatted identifier
    pub fn new(id: impl Into<String>) -> Self {
        TransactionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a transaction relative to the wallet holding the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money arrived in the wallet holding this record
    Credit,

    /// Money left the wallet holding this record
    Debit,
}

impl TransactionKind {
    /// The direction the counterparty records for the same movement
    pub fn opposite(self) -> Self {
        match self {
            TransactionKind::Credit => TransactionKind::Debit,
            TransactionKind::Debit => TransactionKind::Credit,
        }
    }
}

/// A confirmed or pending movement of money
///
/// Serialized with the field names of the persisted state tree; the
/// timestamp is stored as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Always positive
    pub amount: Decimal,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Counterparty display name
    pub peer: String,
}

impl Transaction {
    /// Build the record the counterparty keeps for this same movement
    ///
    /// Identifier, amount and timestamp are shared; only the direction and
    /// the peer name change.
    pub fn counterpart(&self, peer: impl Into<String>) -> Self {
        Transaction {
            id: self.id.clone(),
            amount: self.amount,
            timestamp: self.timestamp,
            kind: self.kind.opposite(),
            peer: peer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn debit() -> Transaction {
        Transaction {
            id: TransactionId::new("TXN-000000001"),
            amount: Decimal::from(150),
            timestamp: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            kind: TransactionKind::Debit,
            peer: "Local Merchant".to_string(),
        }
    }

    #[test]
    fn test_counterpart_shares_id_amount_and_timestamp() {
        let tx = debit();
        let credit = tx.counterpart("ZiPPaY User");

        assert_eq!(credit.id, tx.id);
        assert_eq!(credit.amount, tx.amount);
        assert_eq!(credit.timestamp, tx.timestamp);
        assert_eq!(credit.kind, TransactionKind::Credit);
        assert_eq!(credit.peer, "ZiPPaY User");
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(debit()).unwrap();

        assert_eq!(json["id"], "TXN-000000001");
        assert_eq!(json["type"], "DEBIT");
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
        assert_eq!(json["peer"], "Local Merchant");
    }
}
