//! FlashPay CLI
//!
//! Command-line driver for the FlashPay ledger. Each invocation opens the
//! state snapshot from the state directory, runs one command, persists the
//! result and prints the alert the watch would show.
//!
//! # Usage
//!
//! ```bash
//! flashpay connectivity bluetooth on
//! flashpay connectivity wifi on
//! flashpay load 300
//! flashpay request 150
//! flashpay approve
//! flashpay sync
//! flashpay --state-dir ./demo replay demo.csv > balances.csv
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success (a rejected payment is still a successful run)
//! - 1: Error (unreadable state directory, missing script, etc.)

use flashpay_ledger::cli::{self, CliCommand};
use flashpay_ledger::core::{RandomIdGenerator, SystemClock, WalletLedger, WalletSession};
use flashpay_ledger::io::{encode_snapshot, FileSnapshotStore};
use flashpay_ledger::replay::replay_script;
use std::process;
use tracing::{debug, Level};

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: cli::CliArgs) -> Result<(), String> {
    let ledger = WalletLedger::new(
        args.to_ledger_config(),
        RandomIdGenerator::new(),
        SystemClock,
    );
    let store = FileSnapshotStore::new(&args.state_dir);
    debug!(dir = %store.dir().display(), "opening state directory");
    let mut session = WalletSession::open(store, ledger).map_err(|e| e.to_string())?;

    if let Some(command) = args.command.to_command() {
        let report = session.execute(command).map_err(|e| e.to_string())?;
        println!("{}", report);
        return Ok(());
    }

    match &args.command {
        CliCommand::Show => {
            let snapshot = encode_snapshot(session.state()).map_err(|e| e.to_string())?;
            println!("{}", snapshot);
        }
        CliCommand::Reset => {
            session.reset().map_err(|e| e.to_string())?;
            println!("state reset");
        }
        CliCommand::Replay { script } => {
            // Balance summary goes to stdout, per-command logs to stderr
            let mut output = std::io::stdout();
            replay_script(&mut session, script, &mut output)?;
        }
        _ => {}
    }

    Ok(())
}
