//! Benchmark suite for the wallet ledger
//!
//! Measures full load/pay/sync cycles through the ledger and through a
//! session persisting every snapshot to memory.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use flashpay_ledger::core::{
    LedgerConfig, SequentialIdGenerator, SystemClock, WalletLedger, WalletSession,
};
use flashpay_ledger::{Channel, Command, LedgerState, MemorySnapshotStore};
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

fn linked_state() -> LedgerState {
    let mut state = LedgerState::initial();
    state.connectivity = state
        .connectivity
        .with(Channel::Bluetooth, true)
        .with(Channel::Wifi, true);
    state
}

/// Load, five offline payments, sync; repeated `cycles` times
#[divan::bench(args = [1, 10, 100])]
fn ledger_cycles(cycles: usize) -> LedgerState {
    let mut ledger = WalletLedger::new(
        LedgerConfig::default(),
        SequentialIdGenerator::new(),
        SystemClock,
    );
    let mut state = linked_state();

    for _ in 0..cycles {
        if let Some(next) = ledger
            .load_funds(&state, Decimal::from(50))
            .ok()
            .and_then(|o| o.into_state())
        {
            state = next;
        }
        for _ in 0..5 {
            if let Some(next) = ledger
                .request_payment(&state, Decimal::from(10))
                .ok()
                .and_then(|o| o.into_state())
            {
                state = next;
            }
            if let Some(next) = ledger
                .process_payment(&state, true)
                .ok()
                .and_then(|o| o.into_state())
            {
                state = next;
            }
        }
        if let Some(next) = ledger.sync_watch(&state).ok().and_then(|o| o.into_state()) {
            state = next;
        }
    }

    state
}

/// Same cycle through a session, encoding a snapshot after every mutation
#[divan::bench(args = [1, 10])]
fn session_cycles(cycles: usize) {
    let ledger = WalletLedger::new(
        LedgerConfig::default(),
        SequentialIdGenerator::new(),
        SystemClock,
    );
    let mut session =
        WalletSession::open(MemorySnapshotStore::new(), ledger).expect("Failed to open session");

    for channel in [Channel::Bluetooth, Channel::Wifi] {
        session
            .execute(Command::SetConnectivity {
                channel,
                value: true,
            })
            .expect("Failed to persist");
    }

    for _ in 0..cycles {
        let mut commands = vec![Command::LoadFunds(Decimal::from(50))];
        for _ in 0..5 {
            commands.push(Command::RequestPayment(Decimal::from(10)));
            commands.push(Command::ProcessPayment { approve: true });
        }
        commands.push(Command::SyncWatch);

        for command in commands {
            session.execute(command).expect("Failed to persist");
        }
    }
}
