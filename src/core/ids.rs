//! Transaction identifier generators
//!
//! Identifiers are a prefix followed by nine upper-case base-36 characters.

use crate::core::traits::{IdGenerator, IdPrefix};
use crate::types::TransactionId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of the random or counter part of an identifier
pub const ID_SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random identifiers for production use
///
/// 36^9 possible suffixes per prefix.
pub struct RandomIdGenerator {
    rng: StdRng,
}

impl RandomIdGenerator {
    /// Create a generator seeded from the operating system
    pub fn new() -> Self {
        RandomIdGenerator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible generator
    pub fn seeded(seed: u64) -> Self {
        RandomIdGenerator {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self, prefix: IdPrefix) -> TransactionId {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
            .collect();
        TransactionId::new(format!("{}{}", prefix.as_str(), suffix))
    }
}

/// Monotonic identifiers for deterministic tests and replays
///
/// Yields `TXN-LOAD-000000001`, `TXN-000000002`, ... sharing one counter.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        SequentialIdGenerator { next: 0 }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self, prefix: IdPrefix) -> TransactionId {
        self.next += 1;
        TransactionId::new(format!(
            "{}{:0width$}",
            prefix.as_str(),
            self.next,
            width = ID_SUFFIX_LEN
        ))
    }
}
