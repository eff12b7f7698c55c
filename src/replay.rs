//! Scripted replay of device commands
//!
//! Orchestrates a replay by coordinating between the `ScriptReader` (CSV
//! input), the `WalletSession` (ledger, persistence, alerts) and
//! `write_summary_csv` (balance summary output).
//!
//! Rejected and ignored commands are part of a normal replay: they are
//! logged and the replay continues. Malformed script rows are logged and
//! skipped. Only an unreadable script, a store failure or an output failure
//! abort the replay.

use crate::core::session::{CommandReport, CommandStatus, WalletSession};
use crate::core::traits::{Clock, IdGenerator};
use crate::io::script::{write_summary_csv, ScriptReader};
use crate::io::store::SnapshotStore;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Execute every command in `script_path`, then write the balance summary
///
/// # Returns
///
/// * `Ok(reports)` - One report per executed command, in script order
/// * `Err(String)` - The script could not be opened, a snapshot could not be
///   persisted, or the summary could not be written
pub fn replay_script<S, I, C>(
    session: &mut WalletSession<S, I, C>,
    script_path: &Path,
    output: &mut dyn Write,
) -> Result<Vec<CommandReport>, String>
where
    S: SnapshotStore,
    I: IdGenerator,
    C: Clock,
{
    let reader = ScriptReader::new(script_path)?;
    let mut reports = Vec::new();

    for result in reader {
        match result {
            Ok(command) => {
                let report = session
                    .execute(command)
                    .map_err(|e| format!("Failed to persist state: {}", e))?;

                match &report.status {
                    CommandStatus::Applied | CommandStatus::Ignored(_) => {
                        debug!(%report, "replayed")
                    }
                    CommandStatus::Rejected(_) => info!(%report, "replayed"),
                }
                reports.push(report);
            }
            Err(e) => warn!(error = %e, "skipping script row"),
        }
    }

    write_summary_csv(session.state(), output)?;
    Ok(reports)
}
