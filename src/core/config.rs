//! Ledger configuration
//!
//! Limits and display names used by the ledger, plus the alert lifetime used
//! by the session layer.

use chrono::Duration;
use rust_decimal::Decimal;
use tracing::warn;

/// Configuration for the wallet ledger
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    /// Maximum watch balance, also the largest single load
    pub watch_limit: Decimal,
    /// Largest amount a merchant may request
    pub request_limit: Decimal,
    /// Offline payments allowed before a sync is required
    pub offline_limit: u32,
    /// How long an alert stays on screen
    pub alert_duration: Duration,
    /// Peer name on watch reload transactions
    pub bank_name: String,
    /// Merchant display name on payment requests
    pub merchant_name: String,
    /// User display name on merchant-side credits
    pub user_name: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            watch_limit: Decimal::from(500),
            request_limit: Decimal::from(200),
            offline_limit: 5,
            alert_duration: Duration::milliseconds(3500),
            bank_name: "Primary Bank".to_string(),
            merchant_name: "Local Merchant".to_string(),
            user_name: "ZiPPaY User".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Create a LedgerConfig with custom limits
    ///
    /// Non-positive limits fall back to the defaults with a warning.
    pub fn new(watch_limit: Decimal, request_limit: Decimal, offline_limit: u32) -> Self {
        let default = Self::default();

        let watch_limit = if watch_limit <= Decimal::ZERO {
            warn!(
                requested = %watch_limit,
                default = %default.watch_limit,
                "invalid watch_limit, using default"
            );
            default.watch_limit
        } else {
            watch_limit
        };

        let request_limit = if request_limit <= Decimal::ZERO {
            warn!(
                requested = %request_limit,
                default = %default.request_limit,
                "invalid request_limit, using default"
            );
            default.request_limit
        } else {
            request_limit
        };

        let offline_limit = if offline_limit == 0 {
            warn!(
                default = default.offline_limit,
                "invalid offline_limit 0, using default"
            );
            default.offline_limit
        } else {
            offline_limit
        };

        Self {
            watch_limit,
            request_limit,
            offline_limit,
            ..default
        }
    }
}
