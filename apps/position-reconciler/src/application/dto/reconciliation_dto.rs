//! Reconciliation Report DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::option_position::{
    Anomaly, AnomalyKind, OpenPosition, OptionRight, Reconciliation,
};

/// DTO representing one open position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPositionDto {
    /// Contract id as recorded in the ledger.
    pub contract_id: String,
    /// Underlying ticker.
    pub underlying: String,
    /// Signed net quantity (negative = short).
    pub net_quantity: i64,
    /// Expiration, when the contract id could be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<NaiveDate>,
    /// Strike, when the contract id could be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike: Option<Decimal>,
    /// Call or put, when the contract id could be parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<OptionRight>,
}

impl OpenPositionDto {
    /// Create from a domain open position.
    #[must_use]
    pub fn from_position(position: &OpenPosition) -> Self {
        let contract = position.contract();
        Self {
            contract_id: position.contract_id().to_string(),
            underlying: position.underlying().to_string(),
            net_quantity: position.net_quantity(),
            expiration: contract.as_ref().map(|c| c.expiration()),
            strike: contract.as_ref().map(|c| c.strike()),
            right: contract.as_ref().map(|c| c.right()),
        }
    }
}

/// DTO representing one ledger anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyDto {
    /// Anomaly kind.
    pub kind: AnomalyKind,
    /// Contract the offending event references.
    pub contract_id: String,
    /// Date of the offending event.
    pub date: NaiveDate,
    /// Index of the offending record in the input.
    pub sequence: usize,
    /// Action label as recorded.
    pub action: String,
    /// Net quantity before the event.
    pub net_before: i64,
    /// Net quantity after the event.
    pub net_after: i64,
    /// Human-readable description.
    pub message: String,
}

impl From<&Anomaly> for AnomalyDto {
    fn from(anomaly: &Anomaly) -> Self {
        Self {
            kind: anomaly.kind,
            contract_id: anomaly.contract_id.to_string(),
            date: anomaly.date,
            sequence: anomaly.sequence,
            action: anomaly.action.clone(),
            net_before: anomaly.net_before,
            net_after: anomaly.net_after,
            message: anomaly.message.clone(),
        }
    }
}

/// Response DTO for a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReportDto {
    /// Date stale positions were judged against.
    pub as_of: NaiveDate,
    /// Open positions in contract id order.
    pub open_positions: Vec<OpenPositionDto>,
    /// Anomalies in chronological order.
    pub anomalies: Vec<AnomalyDto>,
    /// Open contracts past their expiration.
    pub stale_positions: Vec<String>,
    /// Number of events folded.
    pub events_processed: usize,
}

impl ReconciliationReportDto {
    /// Build a report from a domain reconciliation.
    #[must_use]
    pub fn from_reconciliation(reconciliation: &Reconciliation, as_of: NaiveDate) -> Self {
        Self {
            as_of,
            open_positions: reconciliation
                .positions()
                .map(OpenPositionDto::from_position)
                .collect(),
            anomalies: reconciliation.anomalies().iter().map(AnomalyDto::from).collect(),
            stale_positions: reconciliation
                .stale_positions(as_of)
                .into_iter()
                .map(|p| p.contract_id().to_string())
                .collect(),
            events_processed: reconciliation.events_processed(),
        }
    }

    /// Net quantity reported for a contract, zero when absent.
    #[must_use]
    pub fn net_quantity(&self, contract_id: &str) -> i64 {
        self.open_positions
            .iter()
            .find(|p| p.contract_id == contract_id)
            .map_or(0, |p| p.net_quantity)
    }
}
