//! Position Reconciler Service
//!
//! Folds ledger events into open positions, one contract timeline at a time.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::domain::ledger::{
    LedgerError, TransactionAction, TransactionEvent, TransactionRecord, events_from_records,
};
use crate::domain::option_position::reconciliation::Reconciliation;
use crate::domain::option_position::value_objects::{Anomaly, AnomalyKind, OpenPosition};
use crate::domain::shared::{ContractId, Symbol};

/// Result of applying one event to a running net quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldStep {
    /// Net quantity after the event.
    pub net_after: i64,
    /// Anomaly raised by the event, if any.
    pub anomaly: Option<AnomalyKind>,
}

/// Stateless reconciler for option transaction ledgers.
pub struct PositionReconciler;

impl PositionReconciler {
    /// Reconcile events into open positions and anomalies.
    ///
    /// Events are grouped by contract and each group is folded in date
    /// order; same-date events keep their input order.
    #[must_use]
    pub fn reconcile(events: &[TransactionEvent]) -> Reconciliation {
        Self::fold(events.iter())
    }

    /// Convert raw ledger records and reconcile them.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidEvent` for the first structurally
    /// invalid record; nothing is reconciled in that case.
    pub fn reconcile_records(records: &[TransactionRecord]) -> Result<Reconciliation, LedgerError> {
        let events = events_from_records(records)?;
        Ok(Self::reconcile(&events))
    }

    /// Reconcile each underlying independently, in parallel.
    ///
    /// Contracts never net across underlyings, so this matches running
    /// [`Self::reconcile`] on every partition.
    #[must_use]
    pub fn reconcile_portfolio(events: &[TransactionEvent]) -> BTreeMap<Symbol, Reconciliation> {
        let mut partitions: BTreeMap<Symbol, Vec<&TransactionEvent>> = BTreeMap::new();
        for event in events {
            partitions
                .entry(event.contract_id().underlying())
                .or_default()
                .push(event);
        }

        partitions
            .into_par_iter()
            .map(|(underlying, events)| (underlying, Self::fold(events)))
            .collect()
    }

    /// Apply one event to a running net quantity.
    #[must_use]
    pub fn apply(net: i64, event: &TransactionEvent) -> FoldStep {
        let Some(action) = event.known_action() else {
            return FoldStep {
                net_after: net,
                anomaly: Some(AnomalyKind::UnknownAction),
            };
        };

        match action {
            TransactionAction::Assigned | TransactionAction::Expired => FoldStep {
                net_after: 0,
                anomaly: (net == 0).then_some(AnomalyKind::UnmatchedClose),
            },
            TransactionAction::SoldShort
            | TransactionAction::BoughtToCover
            | TransactionAction::BoughtToOpen
            | TransactionAction::SoldToClose => {
                let net_after = net.saturating_add(event.signed_quantity().unwrap_or(0));
                let over_close = match action {
                    TransactionAction::BoughtToCover => net_after > 0,
                    TransactionAction::SoldToClose => net_after < 0,
                    _ => false,
                };
                FoldStep {
                    net_after,
                    anomaly: over_close.then_some(AnomalyKind::OverClose),
                }
            }
        }
    }

    fn fold<'a>(events: impl IntoIterator<Item = &'a TransactionEvent>) -> Reconciliation {
        let mut timelines: BTreeMap<&ContractId, Vec<&TransactionEvent>> = BTreeMap::new();
        let mut events_processed = 0;
        for event in events {
            timelines
                .entry(event.contract_id())
                .or_default()
                .push(event);
            events_processed += 1;
        }

        let mut open_positions = BTreeMap::new();
        let mut anomalies = Vec::new();

        for (contract_id, mut timeline) in timelines {
            // Stable: same-date events stay in ingestion order.
            timeline.sort_by_key(|event| event.date());

            let mut net = 0_i64;
            for event in timeline {
                let step = Self::apply(net, event);
                if let Some(kind) = step.anomaly {
                    let anomaly = describe(kind, event, net, step.net_after);
                    debug!(
                        kind = %anomaly.kind,
                        contract_id = %anomaly.contract_id,
                        sequence = anomaly.sequence,
                        "{}",
                        anomaly.message
                    );
                    anomalies.push(anomaly);
                }
                net = step.net_after;
            }

            if net != 0 {
                open_positions.insert(
                    contract_id.clone(),
                    OpenPosition::new(contract_id.clone(), net),
                );
            }
        }

        Reconciliation::new(open_positions, anomalies, events_processed)
    }
}

fn describe(
    kind: AnomalyKind,
    event: &TransactionEvent,
    net_before: i64,
    net_after: i64,
) -> Anomaly {
    let action = event.action().label().to_string();
    let message = match kind {
        AnomalyKind::UnmatchedClose => {
            format!("{action} on {} with no open position", event.contract_id())
        }
        AnomalyKind::OverClose => format!(
            "{action} of {} moved net from {net_before} to {net_after}",
            event.quantity()
        ),
        AnomalyKind::UnknownAction => {
            format!("Unrecognized transaction type '{action}' skipped")
        }
    };

    Anomaly {
        kind,
        contract_id: event.contract_id().clone(),
        date: event.date(),
        sequence: event.sequence(),
        action,
        net_before,
        net_after,
        message,
    }
}
