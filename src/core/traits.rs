//! Core traits for the ledger's injected dependencies
//!
//! The ledger never reads the wall clock or a random source directly. Both
//! come in through these traits so tests can supply deterministic values.

use crate::types::TransactionId;
use chrono::{DateTime, Utc};

/// Kind of identifier to mint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    /// Phone-to-watch reload (`TXN-LOAD-...`)
    Load,
    /// Watch-to-merchant payment (`TXN-...`)
    Payment,
}

impl IdPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            IdPrefix::Load => "TXN-LOAD-",
            IdPrefix::Payment => "TXN-",
        }
    }
}

/// Source of transaction identifiers
pub trait IdGenerator {
    /// Mint the next identifier for the given kind of transaction
    fn next_id(&mut self, prefix: IdPrefix) -> TransactionId;
}

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self, prefix: IdPrefix) -> TransactionId {
        (**self).next_id(prefix)
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
