//! User-facing alerts
//!
//! The ledger only produces alert values. Showing them and letting them
//! expire is up to the consuming layer (see `core::session`).

use serde::Serialize;
use std::fmt;

/// Visual class of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    /// Neutral notices; no ledger operation raises one, device UIs may
    Info,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertKind::Success => f.write_str("success"),
            AlertKind::Error => f.write_str("error"),
            AlertKind::Info => f.write_str("info"),
        }
    }
}

/// A transient message for the watch face
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Alert {
            message: message.into(),
            kind: AlertKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Alert {
            message: message.into(),
            kind: AlertKind::Error,
        }
    }

    /// Neutral notice for device UIs; the ledger itself never raises one
    pub fn info(message: impl Into<String>) -> Self {
        Alert {
            message: message.into(),
            kind: AlertKind::Info,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::success(Alert::success("SYNC COMPLETE"), "[success] SYNC COMPLETE")]
    #[case::error(Alert::error("LOW BALANCE"), "[error] LOW BALANCE")]
    #[case::info(Alert::info("REQUEST SENT"), "[info] REQUEST SENT")]
    fn test_alert_display(#[case] alert: Alert, #[case] expected: &str) {
        assert_eq!(alert.to_string(), expected);
    }
}
