//! End-to-end integration tests
//!
//! These tests validate the complete replay pipeline using predefined CSV
//! command scripts. Each fixture test:
//! 1. Opens a session backed by a fresh temporary state directory
//! 2. Replays tests/fixtures/{name}/input.csv through the ledger
//! 3. Compares the balance summary with expected.csv
//! 4. Reopens the persisted snapshot and checks it matches the final state
//!
//! Fixtures cover:
//! - Happy path (load, pay, sync, withdraw)
//! - The offline payment limit and recovery after a sync
//! - Load guards (connectivity, range, watch limit, inactive watch)
//! - Declined and ignored requests
//! - Sync without Bluetooth, low watch balance
//! - Malformed script rows

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use flashpay_ledger::core::{
        LedgerConfig, ManualClock, SequentialIdGenerator, WalletLedger, WalletSession,
    };
    use flashpay_ledger::io::{FileSnapshotStore, STORAGE_KEY};
    use flashpay_ledger::replay::replay_script;
    use flashpay_ledger::{Command, LedgerState, TransactionKind};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn clock() -> ManualClock {
        ManualClock::new(Utc.timestamp_millis_opt(1_700_000_000_000).unwrap())
    }

    fn open_session<'a>(
        dir: &Path,
        clock: &'a ManualClock,
    ) -> WalletSession<FileSnapshotStore, SequentialIdGenerator, &'a ManualClock> {
        let ledger = WalletLedger::new(LedgerConfig::default(), SequentialIdGenerator::new(), clock);
        WalletSession::open(FileSnapshotStore::new(dir), ledger)
            .unwrap_or_else(|e| panic!("Failed to open session: {}", e))
    }

    /// Replay a fixture script and compare the summary with expected.csv
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read or the output doesn't match.
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.csv", fixture_dir);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );

        let state_dir = TempDir::new().expect("Failed to create temp dir");
        let clock = clock();
        let mut session = open_session(state_dir.path(), &clock);

        let mut output = Vec::new();
        replay_script(&mut session, Path::new(&input_path), &mut output)
            .unwrap_or_else(|e| panic!("Failed to replay script: {}", e));

        let actual_output = String::from_utf8(output).expect("Summary is not UTF-8");
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );

        // The last persisted snapshot is the final state
        let final_state = session.state().clone();
        let reopened = open_session(state_dir.path(), &clock);
        assert_eq!(reopened.state(), &final_state);
    }

    #[rstest]
    #[case("happy_path")]
    #[case("offline_limit")]
    #[case("sync_after_limit")]
    #[case("load_guards")]
    #[case("declined_and_inactive")]
    #[case("sync_requires_bluetooth")]
    #[case("low_balance")]
    #[case("malformed_rows")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let state_dir = TempDir::new().expect("Failed to create temp dir");
        let clock = clock();
        let mut session = open_session(state_dir.path(), &clock);

        let commands = [
            Command::SetConnectivity {
                channel: flashpay_ledger::Channel::Bluetooth,
                value: true,
            },
            Command::SetConnectivity {
                channel: flashpay_ledger::Channel::Wifi,
                value: true,
            },
            Command::LoadFunds(Decimal::from(300)),
            Command::RequestPayment(Decimal::from(150)),
            Command::ProcessPayment { approve: true },
            Command::RequestPayment(Decimal::from(20)),
        ];
        for command in commands {
            session.execute(command).unwrap();
        }

        let snapshot_path = state_dir.path().join(format!("{}.json", STORAGE_KEY));
        assert!(snapshot_path.exists());

        let reopened = open_session(state_dir.path(), &clock);
        let state = reopened.state();
        assert_eq!(state, session.state());

        // Offline payment: user debit pending, merchant credit confirmed
        let debit = &state.user_wallet.pending_sync[0];
        let credit = &state.merchant_wallet.transactions[0];
        assert_eq!(debit.kind, TransactionKind::Debit);
        assert_eq!(credit.kind, TransactionKind::Credit);
        assert_eq!(debit.id, credit.id);
        assert_eq!(
            state.pending_payment_request.as_ref().map(|r| r.amount),
            Some(Decimal::from(20))
        );
    }

    #[test]
    fn test_unreadable_snapshot_falls_back_to_initial_state() {
        let state_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(
            state_dir.path().join(format!("{}.json", STORAGE_KEY)),
            "{ definitely not a snapshot",
        )
        .unwrap();

        let clock = clock();
        let session = open_session(state_dir.path(), &clock);
        assert_eq!(session.state(), &LedgerState::initial());
    }
}
