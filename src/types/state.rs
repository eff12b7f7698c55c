//! The whole shared state tree
//!
//! `LedgerState` is an immutable snapshot: ledger operations never mutate
//! one in place, they build a replacement.

use super::transaction::Transaction;
use super::wallet::{Connectivity, MerchantWallet, PendingPaymentRequest, UserWallet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Phone balance a fresh install starts with
pub const INITIAL_PHONE_BALANCE: i64 = 10_000;

/// Snapshot of the three devices' shared state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    pub user_wallet: UserWallet,
    pub merchant_wallet: MerchantWallet,
    pub pending_payment_request: Option<PendingPaymentRequest>,
    pub connectivity: Connectivity,
}

impl LedgerState {
    /// Initial state used when no snapshot is stored
    ///
    /// Both devices active, radios off, 10000 on the phone and nothing on
    /// the watch.
    pub fn initial() -> Self {
        LedgerState {
            user_wallet: UserWallet::new(Decimal::from(INITIAL_PHONE_BALANCE)),
            merchant_wallet: MerchantWallet::new(),
            pending_payment_request: None,
            connectivity: Connectivity::default(),
        }
    }

    /// Payments the merchant has recorded that the user side has not synced yet
    ///
    /// Merchant credits are written immediately while the matching user debits
    /// wait in `pending_sync`, so the two histories disagree until a sync.
    pub fn unsynced_payments(&self) -> impl Iterator<Item = &Transaction> {
        self.user_wallet.pending_sync.iter()
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = LedgerState::initial();

        assert_eq!(state.user_wallet.balance, Decimal::ZERO);
        assert_eq!(state.user_wallet.phone_balance, Decimal::from(10_000));
        assert!(state.user_wallet.transactions.is_empty());
        assert!(state.user_wallet.pending_sync.is_empty());
        assert_eq!(state.user_wallet.offline_count, 0);
        assert!(state.user_wallet.is_active);
        assert_eq!(state.merchant_wallet.balance, Decimal::ZERO);
        assert_eq!(state.merchant_wallet.bank_balance, Decimal::ZERO);
        assert!(state.merchant_wallet.is_active);
        assert!(state.pending_payment_request.is_none());
        assert!(!state.connectivity.is_bluetooth_on);
        assert!(!state.connectivity.is_wifi_on);
    }

    #[test]
    fn test_serialized_shape_uses_camel_case() {
        let json = serde_json::to_value(LedgerState::initial()).unwrap();

        assert!(json["userWallet"]["phoneBalance"].is_string());
        assert_eq!(json["userWallet"]["offlineCount"], 0);
        assert_eq!(json["userWallet"]["isActive"], true);
        assert!(json["userWallet"]["pendingSync"].is_array());
        assert!(json["merchantWallet"]["bankBalance"].is_string());
        assert!(json["pendingPaymentRequest"].is_null());
        assert_eq!(json["connectivity"]["isBluetoothOn"], false);
        assert_eq!(json["connectivity"]["isWifiOn"], false);
    }
}
