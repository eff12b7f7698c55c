//! Core business logic module
//!
//! This module contains the transaction state machine and the layer driving it:
//! - `traits` - Injected id and clock sources
//! - `ids` - Transaction id generators
//! - `clock` - Clock implementations
//! - `config` - Limits, display names and alert lifetime
//! - `ledger` - The pure state-transition engine
//! - `session` - Snapshot ownership, persistence, alerts and device focus

pub mod clock;
pub mod config;
pub mod ids;
pub mod ledger;
pub mod session;
pub mod traits;

pub use clock::{ManualClock, SystemClock};
pub use config::LedgerConfig;
pub use ids::{RandomIdGenerator, SequentialIdGenerator};
pub use ledger::{IgnoreReason, LedgerResult, Outcome, Transition, WalletLedger};
pub use session::{ActiveAlert, CommandReport, CommandStatus, DeviceView, WalletSession};
pub use traits::{Clock, IdGenerator, IdPrefix};
