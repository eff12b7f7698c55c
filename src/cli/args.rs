use crate::core::LedgerConfig;
use crate::types::{Channel, Command};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Drive the FlashPay phone, watch and merchant wallets
#[derive(Parser, Debug)]
#[command(name = "flashpay")]
#[command(about = "Drive the FlashPay phone, watch and merchant wallets", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Directory holding the state snapshot
    #[arg(
        long = "state-dir",
        value_name = "DIR",
        default_value = ".",
        global = true,
        help = "Directory holding the state snapshot"
    )]
    pub state_dir: PathBuf,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Maximum watch balance
    #[arg(
        long = "watch-limit",
        value_name = "AMOUNT",
        global = true,
        help = "Maximum watch balance (default: 500)"
    )]
    pub watch_limit: Option<Decimal>,

    /// Largest amount a merchant may request
    #[arg(
        long = "request-limit",
        value_name = "AMOUNT",
        global = true,
        help = "Largest merchant request (default: 200)"
    )]
    pub request_limit: Option<Decimal>,

    /// Offline payments allowed before a sync
    #[arg(
        long = "offline-limit",
        value_name = "COUNT",
        global = true,
        help = "Offline payments allowed before a sync (default: 5)"
    )]
    pub offline_limit: Option<u32>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Phone: move money onto the watch
    Load {
        #[arg(value_name = "AMOUNT")]
        amount: Decimal,
    },
    /// Merchant: request a payment from the watch
    Request {
        #[arg(value_name = "AMOUNT")]
        amount: Decimal,
    },
    /// Watch: approve the pending request
    Approve,
    /// Watch: decline the pending request
    Decline,
    /// Phone: merge offline watch payments into the history
    Sync,
    /// Merchant: move collected funds to the bank
    Withdraw,
    /// Watch: power on or off
    ToggleWatch,
    /// Merchant: switch the terminal on or off
    ToggleMerchant,
    /// Set a connectivity channel
    Connectivity {
        #[arg(value_name = "CHANNEL")]
        channel: ChannelArg,
        #[arg(value_name = "STATE")]
        state: SwitchArg,
    },
    /// Print the current snapshot
    Show,
    /// Overwrite the snapshot with the initial state
    Reset,
    /// Execute a CSV script of commands and print a balance summary
    Replay {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ChannelArg {
    Bluetooth,
    Wifi,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum SwitchArg {
    On,
    Off,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Bluetooth => Channel::Bluetooth,
            ChannelArg::Wifi => Channel::Wifi,
        }
    }
}

impl CliCommand {
    /// The ledger command this subcommand runs, if it runs one
    pub fn to_command(&self) -> Option<Command> {
        match self {
            CliCommand::Load { amount } => Some(Command::LoadFunds(*amount)),
            CliCommand::Request { amount } => Some(Command::RequestPayment(*amount)),
            CliCommand::Approve => Some(Command::ProcessPayment { approve: true }),
            CliCommand::Decline => Some(Command::ProcessPayment { approve: false }),
            CliCommand::Sync => Some(Command::SyncWatch),
            CliCommand::Withdraw => Some(Command::WithdrawMerchant),
            CliCommand::ToggleWatch => Some(Command::ToggleUserActive),
            CliCommand::ToggleMerchant => Some(Command::ToggleMerchantActive),
            CliCommand::Connectivity { channel, state } => Some(Command::SetConnectivity {
                channel: (*channel).into(),
                value: *state == SwitchArg::On,
            }),
            CliCommand::Show | CliCommand::Reset | CliCommand::Replay { .. } => None,
        }
    }
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    ///
    /// Overrides that are provided replace the defaults; invalid ones fall
    /// back to the defaults with a warning.
    pub fn to_ledger_config(&self) -> LedgerConfig {
        if self.watch_limit.is_some() || self.request_limit.is_some() || self.offline_limit.is_some()
        {
            let default = LedgerConfig::default();
            LedgerConfig::new(
                self.watch_limit.unwrap_or(default.watch_limit),
                self.request_limit.unwrap_or(default.request_limit),
                self.offline_limit.unwrap_or(default.offline_limit),
            )
        } else {
            LedgerConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::load(&["flashpay", "load", "300"], Some(Command::LoadFunds(Decimal::from(300))))]
    #[case::request(&["flashpay", "request", "150.5"], Some(Command::RequestPayment(Decimal::new(1505, 1))))]
    #[case::approve(&["flashpay", "approve"], Some(Command::ProcessPayment { approve: true }))]
    #[case::decline(&["flashpay", "decline"], Some(Command::ProcessPayment { approve: false }))]
    #[case::sync(&["flashpay", "sync"], Some(Command::SyncWatch))]
    #[case::withdraw(&["flashpay", "withdraw"], Some(Command::WithdrawMerchant))]
    #[case::toggle_watch(&["flashpay", "toggle-watch"], Some(Command::ToggleUserActive))]
    #[case::toggle_merchant(&["flashpay", "toggle-merchant"], Some(Command::ToggleMerchantActive))]
    #[case::bluetooth_on(
        &["flashpay", "connectivity", "bluetooth", "on"],
        Some(Command::SetConnectivity { channel: Channel::Bluetooth, value: true })
    )]
    #[case::wifi_off(
        &["flashpay", "connectivity", "wifi", "off"],
        Some(Command::SetConnectivity { channel: Channel::Wifi, value: false })
    )]
    #[case::show(&["flashpay", "show"], None)]
    #[case::reset(&["flashpay", "reset"], None)]
    #[case::replay(&["flashpay", "replay", "script.csv"], None)]
    fn test_subcommand_parsing(#[case] args: &[&str], #[case] expected: Option<Command>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.command.to_command(), expected);
    }

    #[rstest]
    #[case::default(&["flashpay", "show"], ".")]
    #[case::before_subcommand(&["flashpay", "--state-dir", "/tmp/fp", "show"], "/tmp/fp")]
    #[case::after_subcommand(&["flashpay", "sync", "--state-dir", "/tmp/fp"], "/tmp/fp")]
    fn test_state_dir(#[case] args: &[&str], #[case] expected: &str) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.state_dir, PathBuf::from(expected));
    }

    #[rstest]
    #[case::all_defaults(&["flashpay", "show"], Decimal::from(500), Decimal::from(200), 5)]
    #[case::custom_watch_limit(&["flashpay", "--watch-limit", "1000", "show"], Decimal::from(1000), Decimal::from(200), 5)]
    #[case::custom_request_limit(&["flashpay", "--request-limit", "50", "show"], Decimal::from(500), Decimal::from(50), 5)]
    #[case::custom_offline_limit(&["flashpay", "--offline-limit", "2", "show"], Decimal::from(500), Decimal::from(200), 2)]
    #[case::zero_offline_limit_falls_back(&["flashpay", "--offline-limit", "0", "show"], Decimal::from(500), Decimal::from(200), 5)]
    fn test_ledger_config_conversion(
        #[case] args: &[&str],
        #[case] watch_limit: Decimal,
        #[case] request_limit: Decimal,
        #[case] offline_limit: u32,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_ledger_config();

        assert_eq!(config.watch_limit, watch_limit);
        assert_eq!(config.request_limit, request_limit);
        assert_eq!(config.offline_limit, offline_limit);
    }

    #[rstest]
    #[case::missing_subcommand(&["flashpay"])]
    #[case::missing_amount(&["flashpay", "load"])]
    #[case::invalid_amount(&["flashpay", "load", "lots"])]
    #[case::invalid_channel(&["flashpay", "connectivity", "nfc", "on"])]
    #[case::invalid_switch(&["flashpay", "connectivity", "wifi", "maybe"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
