//! CSV command scripts and balance summaries
//!
//! A script is a CSV file with a `command,arg` header, one command per row:
//!
//! ```text
//! command,arg
//! bluetooth,on
//! wifi,on
//! load,300
//! request,150
//! approve,
//! sync,
//! withdraw,
//! ```
//!
//! Recognised commands: `load <amount>`, `request <amount>`, `approve`,
//! `decline`, `sync`, `withdraw`, `toggle-watch`, `toggle-merchant`,
//! `bluetooth <on|off>`, `wifi <on|off>`.
//!
//! The summary written after a replay has one row per wallet:
//! `wallet,balance,bank_balance,pending_sync,transactions,active`.

use crate::types::{Channel, Command, LedgerState};
use csv::{ReaderBuilder, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// One row of a command script
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScriptRecord {
    pub command: String,
    pub arg: Option<String>,
}

/// Convert a script row into a ledger command
///
/// # Returns
///
/// * `Ok(Command)` - Successfully converted row
/// * `Err(String)` - Unknown command, or a missing or malformed argument
pub fn convert_script_record(record: ScriptRecord) -> Result<Command, String> {
    let name = record.command.trim().to_lowercase();
    let arg = record
        .arg
        .as_deref()
        .map(str::trim)
        .filter(|arg| !arg.is_empty());

    match name.as_str() {
        "load" => parse_amount(&name, arg).map(Command::LoadFunds),
        "request" => parse_amount(&name, arg).map(Command::RequestPayment),
        "approve" => Ok(Command::ProcessPayment { approve: true }),
        "decline" => Ok(Command::ProcessPayment { approve: false }),
        "sync" => Ok(Command::SyncWatch),
        "withdraw" => Ok(Command::WithdrawMerchant),
        "toggle-watch" => Ok(Command::ToggleUserActive),
        "toggle-merchant" => Ok(Command::ToggleMerchantActive),
        "bluetooth" | "wifi" => {
            let channel = Channel::from_str(&name)?;
            let value = parse_switch(&name, arg)?;
            Ok(Command::SetConnectivity { channel, value })
        }
        _ => Err(format!("Unknown command: '{}'", record.command)),
    }
}

fn parse_amount(command: &str, arg: Option<&str>) -> Result<Decimal, String> {
    let arg = arg.ok_or_else(|| format!("{} requires an amount", command))?;
    Decimal::from_str(arg).map_err(|_| format!("Invalid amount '{}' for {}", arg, command))
}

fn parse_switch(command: &str, arg: Option<&str>) -> Result<bool, String> {
    match arg.map(str::to_lowercase).as_deref() {
        Some("on") | Some("true") => Ok(true),
        Some("off") | Some("false") => Ok(false),
        Some(other) => Err(format!("Invalid switch '{}' for {}", other, command)),
        None => Err(format!("{} requires on or off", command)),
    }
}

/// Streaming reader over a command script
///
/// Yields one `Result<Command, String>` per row; errors carry the line number.
#[derive(Debug)]
pub struct ScriptReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl ScriptReader {
    /// Open a script file
    ///
    /// # Returns
    ///
    /// * `Ok(ScriptReader)` if the file opened successfully
    /// * `Err(String)` if the file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open script '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for ScriptReader {
    type Item = Result<Command, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<ScriptRecord>();
        let result = deserializer.next()?;
        self.line_num += 1;

        // +1 for the header row
        let line = self.line_num + 1;
        Some(match result {
            Ok(record) => convert_script_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}

/// Write the per-wallet balance summary
///
/// Amounts are written with two decimal places.
pub fn write_summary_csv(state: &LedgerState, output: &mut dyn Write) -> Result<(), String> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record([
            "wallet",
            "balance",
            "bank_balance",
            "pending_sync",
            "transactions",
            "active",
        ])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let user = &state.user_wallet;
    let merchant = &state.merchant_wallet;
    let rows = [
        [
            "user".to_string(),
            format!("{:.2}", user.balance),
            format!("{:.2}", user.phone_balance),
            user.pending_sync.len().to_string(),
            user.transactions.len().to_string(),
            user.is_active.to_string(),
        ],
        [
            "merchant".to_string(),
            format!("{:.2}", merchant.balance),
            format!("{:.2}", merchant.bank_balance),
            "0".to_string(),
            merchant.transactions.len().to_string(),
            merchant.is_active.to_string(),
        ],
    ];

    for row in rows {
        writer
            .write_record(&row)
            .map_err(|e| format!("Failed to write summary record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
