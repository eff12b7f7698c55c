//! Wallet-related types for the FlashPay ledger
//!
//! This module defines the user's watch wallet, the merchant terminal wallet,
//! the connectivity flags and the transient payment request.

use super::transaction::Transaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user's wallet, split between the watch and the linked bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWallet {
    /// Money available on the watch device (0..=watch limit)
    pub balance: Decimal,

    /// Money in the linked bank/phone account
    pub phone_balance: Decimal,

    /// Confirmed history, newest first
    pub transactions: Vec<Transaction>,

    /// Offline watch payments not yet merged into `transactions`, newest first
    pub pending_sync: Vec<Transaction>,

    /// Offline payments since the last sync; always `pending_sync.len()`
    pub offline_count: u32,

    /// Whether the watch is powered and enabled for payments
    pub is_active: bool,
}

impl UserWallet {
    /// Create a watch wallet funded only on the phone side
    pub fn new(phone_balance: Decimal) -> Self {
        UserWallet {
            balance: Decimal::ZERO,
            phone_balance,
            transactions: Vec::new(),
            pending_sync: Vec::new(),
            offline_count: 0,
            is_active: true,
        }
    }
}

/// The merchant terminal's wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantWallet {
    /// Funds collected and not yet withdrawn
    pub balance: Decimal,

    /// Funds already withdrawn to the merchant's bank
    pub bank_balance: Decimal,

    /// History, newest first
    pub transactions: Vec<Transaction>,

    /// Whether the terminal accepts payment requests
    pub is_active: bool,
}

impl MerchantWallet {
    pub fn new() -> Self {
        MerchantWallet {
            balance: Decimal::ZERO,
            bank_balance: Decimal::ZERO,
            transactions: Vec::new(),
            is_active: true,
        }
    }
}

impl Default for MerchantWallet {
    fn default() -> Self {
        Self::new()
    }
}

/// A merchant's request waiting for approval on the watch
///
/// At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPaymentRequest {
    /// Merchant display name
    pub from: String,

    pub amount: Decimal,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

/// Radio state gating which operations are permitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connectivity {
    pub is_bluetooth_on: bool,
    pub is_wifi_on: bool,
}

impl Connectivity {
    /// Both radios are on, as required to reload the watch
    pub fn is_fully_linked(&self) -> bool {
        self.is_bluetooth_on && self.is_wifi_on
    }

    /// Return a copy with one channel set
    pub fn with(self, channel: Channel, value: bool) -> Self {
        match channel {
            Channel::Bluetooth => Connectivity {
                is_bluetooth_on: value,
                ..self
            },
            Channel::Wifi => Connectivity {
                is_wifi_on: value,
                ..self
            },
        }
    }
}

/// A connectivity channel that can be switched on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Bluetooth,
    Wifi,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Bluetooth => f.write_str("bluetooth"),
            Channel::Wifi => f.write_str("wifi"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bluetooth" | "bt" => Ok(Channel::Bluetooth),
            "wifi" | "wi-fi" => Ok(Channel::Wifi),
            other => Err(format!("Unknown connectivity channel: '{}'", other)),
        }
    }
}
