//! Commands issued by the three device UIs

use super::wallet::Channel;
use rust_decimal::Decimal;
use std::fmt;

/// One user action against the shared state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Phone: move money onto the watch
    LoadFunds(Decimal),
    /// Merchant: ask the watch for a payment
    RequestPayment(Decimal),
    /// Watch: approve (`true`) or decline the pending request
    ProcessPayment { approve: bool },
    /// Phone: merge offline watch payments into the history
    SyncWatch,
    /// Merchant: move collected funds to the bank
    WithdrawMerchant,
    ToggleUserActive,
    ToggleMerchantActive,
    SetConnectivity { channel: Channel, value: bool },
}

impl Command {
    /// Stable name used in logs and reports
    pub fn name(&self) -> &'static str {
        match self {
            Command::LoadFunds(_) => "load",
            Command::RequestPayment(_) => "request",
            Command::ProcessPayment { approve: true } => "approve",
            Command::ProcessPayment { approve: false } => "decline",
            Command::SyncWatch => "sync",
            Command::WithdrawMerchant => "withdraw",
            Command::ToggleUserActive => "toggle-watch",
            Command::ToggleMerchantActive => "toggle-merchant",
            Command::SetConnectivity { .. } => "connectivity",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::LoadFunds(amount) | Command::RequestPayment(amount) => {
                write!(f, "{} {}", self.name(), amount)
            }
            Command::SetConnectivity { channel, value } => write!(
                f,
                "{} {} {}",
                self.name(),
                channel,
                if *value { "on" } else { "off" }
            ),
            _ => f.write_str(self.name()),
        }
    }
}
