//! Wallet session: the layer between the device UIs and the ledger
//!
//! The session owns the current snapshot. For every command it asks the
//! `WalletLedger` for a transition and then:
//! - replaces the snapshot wholesale and persists it when the state changed
//! - records the resulting alert with an expiry instant
//! - moves device focus to the watch when a merchant request arrives
//!
//! Rejections only raise an error alert; the snapshot and the store are left
//! alone. Ignored commands change nothing at all.

use crate::core::clock::SystemClock;
use crate::core::ids::RandomIdGenerator;
use crate::core::ledger::{IgnoreReason, LedgerResult, Outcome, Transition, WalletLedger};
use crate::core::traits::{Clock, IdGenerator};
use crate::io::snapshot::{decode_snapshot, encode_snapshot, STORAGE_KEY};
use crate::io::store::SnapshotStore;
use crate::types::{Alert, Command, LedgerError, LedgerState, StoreError};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{debug, info, warn};

/// Which device screen has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceView {
    /// Phone UPI app
    #[default]
    Phone,
    /// Smartwatch micro-wallet
    Watch,
    /// Merchant terminal
    Merchant,
}

/// An alert on screen until `expires_at`
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAlert {
    pub alert: Alert,
    pub expires_at: DateTime<Utc>,
}

impl ActiveAlert {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// How a command ended
#[derive(Debug, Clone, PartialEq)]
pub enum CommandStatus {
    Applied,
    Ignored(IgnoreReason),
    Rejected(LedgerError),
}

/// Summary of one executed command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReport {
    pub command: Command,
    pub status: CommandStatus,
    /// Alert raised by this command, if any
    pub alert: Option<Alert>,
}

impl fmt::Display for CommandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.alert) {
            (_, Some(alert)) => write!(f, "{}: {}", self.command, alert),
            (CommandStatus::Ignored(reason), None) => {
                write!(f, "{}: ignored ({})", self.command, reason)
            }
            _ => write!(f, "{}: ok", self.command),
        }
    }
}

/// Current snapshot plus the ledger and store driving it
pub struct WalletSession<S, I = RandomIdGenerator, C = SystemClock> {
    ledger: WalletLedger<I, C>,
    store: S,
    state: LedgerState,
    alert: Option<ActiveAlert>,
    view: DeviceView,
}

impl<S: SnapshotStore, I: IdGenerator, C: Clock> WalletSession<S, I, C> {
    /// Open a session from the stored snapshot
    ///
    /// Falls back to the initial state when nothing is stored or the stored
    /// snapshot cannot be decoded. Store read failures are returned.
    pub fn open(store: S, ledger: WalletLedger<I, C>) -> Result<Self, StoreError> {
        let state = match store.load(STORAGE_KEY)? {
            None => {
                info!("no stored snapshot, starting from initial state");
                LedgerState::initial()
            }
            Some(raw) => match decode_snapshot(&raw) {
                Ok(state) => state,
                Err(error) => {
                    warn!(%error, "unreadable snapshot, starting from initial state");
                    LedgerState::initial()
                }
            },
        };

        Ok(WalletSession {
            ledger,
            store,
            state,
            alert: None,
            view: DeviceView::default(),
        })
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn ledger(&self) -> &WalletLedger<I, C> {
        &self.ledger
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> DeviceView {
        self.view
    }

    pub fn set_view(&mut self, view: DeviceView) {
        self.view = view;
    }

    /// Run one command against the current snapshot
    ///
    /// Only persistence failures are returned as errors; ledger rejections are
    /// reported through `CommandReport::status`.
    pub fn execute(&mut self, command: Command) -> Result<CommandReport, StoreError> {
        let result = self.dispatch(command);

        match result {
            Ok(Outcome::Applied(Transition { state, alert })) => {
                self.persist(&state)?;
                self.state = state;

                if matches!(command, Command::RequestPayment(_)) {
                    self.view = DeviceView::Watch;
                }
                if let Some(alert) = &alert {
                    self.raise(alert.clone());
                }
                debug!(%command, "command applied");

                Ok(CommandReport {
                    command,
                    status: CommandStatus::Applied,
                    alert,
                })
            }
            Ok(Outcome::Ignored(reason)) => Ok(CommandReport {
                command,
                status: CommandStatus::Ignored(reason),
                alert: None,
            }),
            Err(error) => {
                let alert = error.alert();
                self.raise(alert.clone());
                Ok(CommandReport {
                    command,
                    status: CommandStatus::Rejected(error),
                    alert: Some(alert),
                })
            }
        }
    }

    /// Discard everything and persist the initial state
    pub fn reset(&mut self) -> Result<(), StoreError> {
        let state = LedgerState::initial();
        self.persist(&state)?;
        self.state = state;
        self.alert = None;
        self.view = DeviceView::default();
        info!("state reset to initial snapshot");
        Ok(())
    }

    /// The alert still on screen at `now`
    pub fn alert(&self, now: DateTime<Utc>) -> Option<&Alert> {
        self.alert
            .as_ref()
            .filter(|active| !active.is_expired(now))
            .map(|active| &active.alert)
    }

    /// The alert still on screen according to the ledger's clock
    pub fn current_alert(&self) -> Option<&Alert> {
        self.alert(self.ledger.clock().now())
    }

    /// Drop the alert once it has expired
    pub fn clear_expired_alert(&mut self) {
        let now = self.ledger.clock().now();
        if self.alert.as_ref().is_some_and(|active| active.is_expired(now)) {
            self.alert = None;
        }
    }

    fn dispatch(&mut self, command: Command) -> LedgerResult {
        let state = &self.state;
        let ledger = &mut self.ledger;

        match command {
            Command::LoadFunds(amount) => ledger.load_funds(state, amount),
            Command::RequestPayment(amount) => ledger.request_payment(state, amount),
            Command::ProcessPayment { approve } => ledger.process_payment(state, approve),
            Command::SyncWatch => ledger.sync_watch(state),
            Command::WithdrawMerchant => ledger.withdraw_merchant(state),
            Command::ToggleUserActive => ledger.toggle_user_active(state),
            Command::ToggleMerchantActive => ledger.toggle_merchant_active(state),
            Command::SetConnectivity { channel, value } => {
                ledger.set_connectivity(state, channel, value)
            }
        }
    }

    /// A newer alert always supersedes the one on screen
    fn raise(&mut self, alert: Alert) {
        let expires_at = self.ledger.clock().now() + self.ledger.config().alert_duration;
        self.alert = Some(ActiveAlert { alert, expires_at });
    }

    fn persist(&mut self, state: &LedgerState) -> Result<(), StoreError> {
        let encoded = encode_snapshot(state)?;
        self.store.save(STORAGE_KEY, &encoded)
    }
}
