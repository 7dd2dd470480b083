//! Reconciliation Result

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::value_objects::{Anomaly, AnomalyKind, OpenPosition};
use crate::domain::shared::ContractId;

/// Outcome of folding a transaction ledger: open positions plus anomalies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Contracts with a nonzero net quantity, keyed by contract id.
    open_positions: BTreeMap<ContractId, OpenPosition>,
    /// Anomalies in chronological order (date, then ingestion sequence).
    anomalies: Vec<Anomaly>,
    /// Number of events folded.
    events_processed: usize,
}

impl Reconciliation {
    pub(crate) fn new(
        open_positions: BTreeMap<ContractId, OpenPosition>,
        mut anomalies: Vec<Anomaly>,
        events_processed: usize,
    ) -> Self {
        anomalies.sort_by_key(|a| (a.date, a.sequence));
        Self {
            open_positions,
            anomalies,
            events_processed,
        }
    }

    /// Merge results for disjoint sets of contracts (e.g. per underlying).
    #[must_use]
    pub fn combine(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut open_positions = BTreeMap::new();
        let mut anomalies = Vec::new();
        let mut events_processed = 0;

        for part in parts {
            open_positions.extend(part.open_positions);
            anomalies.extend(part.anomalies);
            events_processed += part.events_processed;
        }

        Self::new(open_positions, anomalies, events_processed)
    }

    /// Open positions keyed by contract id.
    #[must_use]
    pub const fn open_positions(&self) -> &BTreeMap<ContractId, OpenPosition> {
        &self.open_positions
    }

    /// Iterate open positions in contract id order.
    pub fn positions(&self) -> impl Iterator<Item = &OpenPosition> {
        self.open_positions.values()
    }

    /// Look up the open position for a contract.
    #[must_use]
    pub fn position(&self, contract_id: &str) -> Option<&OpenPosition> {
        let contract_id = ContractId::new(contract_id).ok()?;
        self.open_positions.get(&contract_id)
    }

    /// Net quantity for a contract; zero when closed or never seen.
    #[must_use]
    pub fn net_quantity(&self, contract_id: &str) -> i64 {
        self.position(contract_id)
            .map_or(0, OpenPosition::net_quantity)
    }

    /// All anomalies, chronologically.
    #[must_use]
    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Anomalies of one kind.
    pub fn anomalies_of(&self, kind: AnomalyKind) -> impl Iterator<Item = &Anomaly> {
        self.anomalies.iter().filter(move |a| a.kind == kind)
    }

    /// Number of events folded.
    #[must_use]
    pub const fn events_processed(&self) -> usize {
        self.events_processed
    }

    /// True when the ledger produced no anomalies.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    /// Open positions whose parsed expiration is before `as_of`.
    ///
    /// These usually point at a missing expiry or assignment row.
    #[must_use]
    pub fn stale_positions(&self, as_of: NaiveDate) -> Vec<&OpenPosition> {
        self.positions()
            .filter(|p| p.contract().is_some_and(|c| c.is_expired(as_of)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ContractId {
        ContractId::new(s).unwrap()
    }

    fn anomaly(kind: AnomalyKind, day: u32, sequence: usize) -> Anomaly {
        Anomaly {
            kind,
            contract_id: id("CLSK Jul 25 '25 $9 Call"),
            date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
            sequence,
            action: "Option Assigned".to_string(),
            net_before: 0,
            net_after: 0,
            message: String::new(),
        }
    }

    fn single(contract: &str, net: i64) -> Reconciliation {
        let mut positions = BTreeMap::new();
        positions.insert(id(contract), OpenPosition::new(id(contract), net));
        Reconciliation::new(positions, vec![], 1)
    }

    #[test]
    fn new_orders_anomalies_chronologically() {
        let rec = Reconciliation::new(
            BTreeMap::new(),
            vec![
                anomaly(AnomalyKind::OverClose, 20, 4),
                anomaly(AnomalyKind::UnmatchedClose, 10, 9),
                anomaly(AnomalyKind::UnknownAction, 20, 1),
            ],
            3,
        );

        let order: Vec<_> = rec.anomalies().iter().map(|a| a.sequence).collect();
        assert_eq!(order, vec![9, 1, 4]);
        assert!(!rec.is_clean());
        assert_eq!(rec.anomalies_of(AnomalyKind::OverClose).count(), 1);
    }

    #[test]
    fn position_lookup_normalizes_whitespace() {
        let rec = single("CLSK Sep 19 '25 $7 Call", -1);

        assert_eq!(rec.net_quantity("CLSK  Sep 19 '25 $7 Call"), -1);
        assert_eq!(rec.net_quantity("CLSK Jul 25 '25 $9 Call"), 0);
        assert!(rec.position("").is_none());
    }

    #[test]
    fn combine_merges_disjoint_parts() {
        let merged = Reconciliation::combine([
            single("CLSK Sep 19 '25 $7 Call", -1),
            single("AAPL Sep 19 '25 $150 Put", 2),
        ]);

        assert_eq!(merged.open_positions().len(), 2);
        assert_eq!(merged.events_processed(), 2);
        assert_eq!(merged.net_quantity("AAPL Sep 19 '25 $150 Put"), 2);
    }

    #[test]
    fn stale_positions_past_expiration() {
        let rec = Reconciliation::combine([
            single("CLSK Jul 25 '25 $8.50 Call", -1),
            single("CLSK Sep 19 '25 $7 Call", -1),
            single("UNPARSEABLE", 1),
        ]);

        let as_of = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let stale = rec.stale_positions(as_of);

        assert_eq!(stale.len(), 1);
        assert_eq!(
            stale[0].contract_id().as_str(),
            "CLSK Jul 25 '25 $8.50 Call"
        );
    }

    #[test]
    fn default_is_empty() {
        let rec = Reconciliation::default();
        assert!(rec.is_clean());
        assert_eq!(rec.positions().count(), 0);
        assert_eq!(rec.events_processed(), 0);
    }
}
