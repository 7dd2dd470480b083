//! Ledger anomaly types.
//!
//! Inconsistencies detected while folding a contract's events. Anomalies
//! never stop reconciliation; they are returned next to the positions so a
//! human can audit the ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::ContractId;

/// Kind of ledger inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyKind {
    /// Assignment or expiry on a contract with nothing open.
    UnmatchedClose,
    /// Closing trade larger than the open position; applied anyway.
    OverClose,
    /// Transaction type outside the fixed mapping; skipped.
    UnknownAction,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnmatchedClose => write!(f, "UNMATCHED_CLOSE"),
            Self::OverClose => write!(f, "OVER_CLOSE"),
            Self::UnknownAction => write!(f, "UNKNOWN_ACTION"),
        }
    }
}

/// A detected ledger inconsistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Kind of anomaly.
    pub kind: AnomalyKind,
    /// Contract the offending event references.
    pub contract_id: ContractId,
    /// Date of the offending event.
    pub date: NaiveDate,
    /// Ingestion sequence of the offending event.
    pub sequence: usize,
    /// Action label as recorded in the ledger.
    pub action: String,
    /// Net quantity before the event.
    pub net_before: i64,
    /// Net quantity after the event.
    pub net_after: i64,
    /// Human-readable description.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_kind_display() {
        assert_eq!(AnomalyKind::UnmatchedClose.to_string(), "UNMATCHED_CLOSE");
        assert_eq!(AnomalyKind::OverClose.to_string(), "OVER_CLOSE");
        assert_eq!(AnomalyKind::UnknownAction.to_string(), "UNKNOWN_ACTION");
    }

    #[test]
    fn anomaly_kind_serde_matches_display() {
        for kind in [
            AnomalyKind::UnmatchedClose,
            AnomalyKind::OverClose,
            AnomalyKind::UnknownAction,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn anomaly_creation() {
        let anomaly = Anomaly {
            kind: AnomalyKind::UnmatchedClose,
            contract_id: ContractId::new("CLSK Jul 25 '25 $9 Call").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 7, 26).unwrap(),
            sequence: 0,
            action: "Option Assigned".to_string(),
            net_before: 0,
            net_after: 0,
            message: "nothing open".to_string(),
        };

        assert_eq!(anomaly.kind, AnomalyKind::UnmatchedClose);
        assert_eq!(anomaly.net_after, 0);
    }
}
