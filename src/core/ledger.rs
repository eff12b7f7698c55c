//! Wallet ledger: the transaction state machine
//!
//! This module provides the `WalletLedger`, a pure state-transition engine over
//! the shared `LedgerState`. Every operation takes the current snapshot and
//! returns a replacement snapshot (plus an optional alert), a silent no-op, or
//! a rejection. The input snapshot is never modified.
//!
//! The ledger enforces these rules:
//! - The watch balance never exceeds the configured watch limit
//! - Watch reloads need an active watch and both radios on
//! - Watch payments are recorded offline in `pending_sync` and blocked once the
//!   offline limit is reached, until a sync merges them into the history
//! - Every payment produces a DEBIT on the user side and a CREDIT on the
//!   merchant side with the same id, amount and timestamp

use crate::core::clock::SystemClock;
use crate::core::config::LedgerConfig;
use crate::core::ids::RandomIdGenerator;
use crate::core::traits::{Clock, IdGenerator, IdPrefix};
use crate::types::{
    Alert, Channel, LedgerError, LedgerState, PendingPaymentRequest, Transaction, TransactionKind,
};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{debug, info};

/// A replacement snapshot produced by a successful operation
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: LedgerState,
    pub alert: Option<Alert>,
}

impl Transition {
    fn new(state: LedgerState, alert: Option<Alert>) -> Self {
        Transition { state, alert }
    }
}

/// Why an operation was silently ignored
#[derive(Debug, Clone, PartialEq)]
pub enum IgnoreReason {
    /// Load amount outside `(0, watch limit]`
    LoadAmountOutOfRange(Decimal),
    /// Request amount not positive or above the request limit
    RequestAmountOutOfRange(Decimal),
    /// The merchant terminal is switched off
    MerchantInactive,
    /// Approval arrived with no request pending
    NoPendingRequest,
    /// The merchant has nothing collected
    NothingToWithdraw,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::LoadAmountOutOfRange(amount) => {
                write!(f, "load amount {} out of range", amount)
            }
            IgnoreReason::RequestAmountOutOfRange(amount) => {
                write!(f, "request amount {} out of range", amount)
            }
            IgnoreReason::MerchantInactive => f.write_str("merchant terminal inactive"),
            IgnoreReason::NoPendingRequest => f.write_str("no pending payment request"),
            IgnoreReason::NothingToWithdraw => f.write_str("nothing to withdraw"),
        }
    }
}

/// Result of an operation that was not rejected
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The state changed
    Applied(Transition),
    /// Nothing changed and nothing is shown to the user
    Ignored(IgnoreReason),
}

impl Outcome {
    fn applied(state: LedgerState, alert: Option<Alert>) -> Self {
        Outcome::Applied(Transition::new(state, alert))
    }

    /// The replacement snapshot, if the state changed
    pub fn into_state(self) -> Option<LedgerState> {
        match self {
            Outcome::Applied(transition) => Some(transition.state),
            Outcome::Ignored(_) => None,
        }
    }
}

/// Result type of every ledger operation
pub type LedgerResult = Result<Outcome, LedgerError>;

/// The transaction state machine
///
/// Holds only configuration and the injected id/clock sources; the state it
/// operates on is passed into every call.
pub struct WalletLedger<I = RandomIdGenerator, C = SystemClock> {
    config: LedgerConfig,
    ids: I,
    clock: C,
}

impl WalletLedger {
    /// Ledger with default limits, random ids and the system clock
    pub fn with_defaults() -> Self {
        WalletLedger::new(
            LedgerConfig::default(),
            RandomIdGenerator::new(),
            SystemClock,
        )
    }
}

impl<I: IdGenerator, C: Clock> WalletLedger<I, C> {
    pub fn new(config: LedgerConfig, ids: I, clock: C) -> Self {
        WalletLedger { config, ids, clock }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Move `amount` from the phone balance onto the watch
    ///
    /// Checks, first failure wins: watch active, both radios on, amount in
    /// `(0, watch limit]` (otherwise ignored), resulting watch balance within
    /// the limit, phone balance covers the amount.
    ///
    /// On success a CREDIT from the bank is put at the front of the confirmed
    /// history.
    pub fn load_funds(&mut self, state: &LedgerState, amount: Decimal) -> LedgerResult {
        let user = &state.user_wallet;

        if !user.is_active {
            return reject("load_funds", LedgerError::WatchInactive);
        }

        if !state.connectivity.is_fully_linked() {
            return reject(
                "load_funds",
                LedgerError::sync_error(
                    state.connectivity.is_bluetooth_on,
                    state.connectivity.is_wifi_on,
                ),
            );
        }

        if amount <= Decimal::ZERO || amount > self.config.watch_limit {
            return ignore("load_funds", IgnoreReason::LoadAmountOutOfRange(amount));
        }

        let new_balance = user
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("load_funds"))?;

        if new_balance > self.config.watch_limit {
            return reject(
                "load_funds",
                LedgerError::limit_reached(user.balance, amount, self.config.watch_limit),
            );
        }

        if user.phone_balance < amount {
            return reject(
                "load_funds",
                LedgerError::insufficient_bank_funds(user.phone_balance, amount),
            );
        }

        let tx = Transaction {
            id: self.ids.next_id(IdPrefix::Load),
            amount,
            timestamp: self.clock.now(),
            kind: TransactionKind::Credit,
            peer: self.config.bank_name.clone(),
        };
        debug!(id = %tx.id, %amount, balance = %new_balance, "watch loaded");

        let mut next = state.clone();
        next.user_wallet.balance = new_balance;
        next.user_wallet.phone_balance -= amount;
        next.user_wallet.transactions.insert(0, tx);

        Ok(Outcome::applied(
            next,
            Some(Alert::success(format!("+₹{} LOADED", amount.normalize()))),
        ))
    }

    /// Merchant asks the watch for `amount`
    ///
    /// Ignored while the merchant terminal is off or when the amount is not
    /// in `(0, request limit]`; rejected while the watch is off. A new request
    /// replaces any request still pending. The caller is expected to move
    /// focus to the watch on success.
    pub fn request_payment(&self, state: &LedgerState, amount: Decimal) -> LedgerResult {
        if !state.merchant_wallet.is_active {
            return ignore("request_payment", IgnoreReason::MerchantInactive);
        }

        if !state.user_wallet.is_active {
            return reject("request_payment", LedgerError::WatchInactive);
        }

        if amount <= Decimal::ZERO || amount > self.config.request_limit {
            return ignore(
                "request_payment",
                IgnoreReason::RequestAmountOutOfRange(amount),
            );
        }

        let request = PendingPaymentRequest {
            from: self.config.merchant_name.clone(),
            amount,
            timestamp: self.clock.now(),
        };
        debug!(from = %request.from, %amount, "payment requested");

        let mut next = state.clone();
        next.pending_payment_request = Some(request);
        Ok(Outcome::applied(next, None))
    }

    /// Approve or decline the pending request on the watch
    ///
    /// Declining always clears the request slot and shows a cancellation.
    /// Approving with nothing pending is ignored; otherwise it needs an active
    /// watch, enough watch balance and an offline count below the limit.
    ///
    /// An approved payment is recorded twice: a DEBIT at the front of the
    /// user's `pending_sync` and a matching CREDIT at the front of the merchant
    /// history. The merchant side is always online, so its credit is final
    /// immediately, while the user's debit stays unconfirmed until the next
    /// `sync_watch`. Nothing forces that sync, so the two histories can
    /// disagree for as long as the user does not sync.
    pub fn process_payment(&mut self, state: &LedgerState, approve: bool) -> LedgerResult {
        if !approve {
            debug!("payment declined");
            let mut next = state.clone();
            next.pending_payment_request = None;
            return Ok(Outcome::applied(next, Some(Alert::error("PAYMENT CANCEL"))));
        }

        let Some(request) = state.pending_payment_request.as_ref() else {
            return ignore("process_payment", IgnoreReason::NoPendingRequest);
        };
        let user = &state.user_wallet;

        if !user.is_active {
            return reject("process_payment", LedgerError::WatchInactive);
        }

        if user.balance < request.amount {
            return reject(
                "process_payment",
                LedgerError::low_balance(user.balance, request.amount),
            );
        }

        if user.offline_count >= self.config.offline_limit {
            return reject(
                "process_payment",
                LedgerError::sync_required(user.offline_count, self.config.offline_limit),
            );
        }

        let merchant_balance = state
            .merchant_wallet
            .balance
            .checked_add(request.amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("process_payment"))?;

        let debit = Transaction {
            id: self.ids.next_id(IdPrefix::Payment),
            amount: request.amount,
            timestamp: self.clock.now(),
            kind: TransactionKind::Debit,
            peer: request.from.clone(),
        };
        let credit = debit.counterpart(self.config.user_name.clone());
        debug!(
            id = %debit.id,
            amount = %debit.amount,
            offline_count = user.offline_count + 1,
            "offline payment recorded"
        );

        let mut next = state.clone();
        next.user_wallet.balance -= request.amount;
        next.user_wallet.pending_sync.insert(0, debit);
        next.user_wallet.offline_count += 1;
        next.merchant_wallet.balance = merchant_balance;
        next.merchant_wallet.transactions.insert(0, credit);
        next.pending_payment_request = None;

        Ok(Outcome::applied(next, Some(Alert::success("PAID SUCCESS"))))
    }

    /// Merge offline payments into the confirmed history
    ///
    /// Needs Bluetooth. The whole `pending_sync` sequence, in its current
    /// order, goes in front of `transactions`; the offline counter resets.
    pub fn sync_watch(&self, state: &LedgerState) -> LedgerResult {
        if !state.connectivity.is_bluetooth_on {
            return reject("sync_watch", LedgerError::SyncFailed);
        }

        let mut next = state.clone();
        let user = &mut next.user_wallet;
        debug!(merged = user.pending_sync.len(), "watch synced");

        let mut merged = std::mem::take(&mut user.pending_sync);
        merged.append(&mut user.transactions);
        user.transactions = merged;
        user.offline_count = 0;

        Ok(Outcome::applied(next, Some(Alert::success("SYNC COMPLETE"))))
    }

    /// Move everything the merchant collected to the merchant's bank
    pub fn withdraw_merchant(&self, state: &LedgerState) -> LedgerResult {
        let amount = state.merchant_wallet.balance;
        if amount <= Decimal::ZERO {
            return ignore("withdraw_merchant", IgnoreReason::NothingToWithdraw);
        }

        let bank_balance = state
            .merchant_wallet
            .bank_balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdraw_merchant"))?;
        debug!(%amount, %bank_balance, "merchant withdrawal");

        let mut next = state.clone();
        next.merchant_wallet.balance = Decimal::ZERO;
        next.merchant_wallet.bank_balance = bank_balance;
        Ok(Outcome::applied(next, None))
    }

    /// Power the watch on or off
    pub fn toggle_user_active(&self, state: &LedgerState) -> LedgerResult {
        let mut next = state.clone();
        next.user_wallet.is_active = !state.user_wallet.is_active;
        debug!(active = next.user_wallet.is_active, "watch toggled");

        let alert = if next.user_wallet.is_active {
            Alert::success("WATCH ACTIVE")
        } else {
            Alert::error("WATCH INACTIVE")
        };
        Ok(Outcome::applied(next, Some(alert)))
    }

    /// Switch the merchant terminal on or off
    pub fn toggle_merchant_active(&self, state: &LedgerState) -> LedgerResult {
        let mut next = state.clone();
        next.merchant_wallet.is_active = !state.merchant_wallet.is_active;
        debug!(active = next.merchant_wallet.is_active, "merchant toggled");
        Ok(Outcome::applied(next, None))
    }

    pub fn set_connectivity(
        &self,
        state: &LedgerState,
        channel: Channel,
        value: bool,
    ) -> LedgerResult {
        let mut next = state.clone();
        next.connectivity = state.connectivity.with(channel, value);
        debug!(%channel, value, "connectivity changed");
        Ok(Outcome::applied(next, None))
    }
}

fn reject(operation: &str, error: LedgerError) -> LedgerResult {
    info!(operation, %error, "operation rejected");
    Err(error)
}

fn ignore(operation: &str, reason: IgnoreReason) -> LedgerResult {
    debug!(operation, %reason, "operation ignored");
    Ok(Outcome::Ignored(reason))
}
