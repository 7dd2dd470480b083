//! Reconcile Positions Use Case

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::application::dto::ReconciliationReportDto;
use crate::application::ports::{SourceError, TransactionSourcePort};
use crate::domain::ledger::{LedgerError, TransactionEvent, TransactionRecord, events_from_records};
use crate::domain::option_position::{PositionReconciler, Reconciliation};
use crate::domain::shared::Symbol;

/// Input for a reconciliation run against the transaction source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePositionsRequest {
    /// Restrict the run to one underlying.
    pub underlying: Option<Symbol>,
    /// Date stale positions are judged against.
    pub as_of: NaiveDate,
}

impl ReconcilePositionsRequest {
    /// Reconcile every underlying as of `as_of`.
    #[must_use]
    pub const fn all(as_of: NaiveDate) -> Self {
        Self {
            underlying: None,
            as_of,
        }
    }

    /// Restrict the run to one underlying.
    #[must_use]
    pub fn for_underlying(mut self, underlying: impl Into<Symbol>) -> Self {
        self.underlying = Some(underlying.into());
        self
    }
}

/// Errors from the reconcile use case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UseCaseError {
    /// Transaction source failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A record was structurally invalid.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Use case for reducing the transaction ledger to open option positions.
pub struct ReconcilePositionsUseCase<S>
where
    S: TransactionSourcePort,
{
    source: Arc<S>,
}

impl<S> ReconcilePositionsUseCase<S>
where
    S: TransactionSourcePort,
{
    /// Create a new `ReconcilePositionsUseCase`.
    pub const fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Fetch the ledger and reconcile it.
    ///
    /// Every record is validated and numbered by its ledger row before the
    /// underlying filter applies, so errors and anomalies always point at
    /// the row in the full ledger.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Source` when the ledger cannot be read and
    /// `UseCaseError::Ledger` when a record is structurally invalid.
    pub async fn execute(
        &self,
        request: ReconcilePositionsRequest,
    ) -> Result<ReconciliationReportDto, UseCaseError> {
        let records = self.source.fetch_transactions().await?;
        info!(records = records.len(), "Fetched transaction records");

        let mut events = to_events(&records)?;
        if let Some(underlying) = &request.underlying {
            events.retain(|event| event.contract_id().underlying() == *underlying);
            info!(
                underlying = underlying.as_str(),
                events = events.len(),
                "Filtered ledger by underlying"
            );
        }

        Ok(report(&events, request.as_of))
    }

    /// Reconcile records supplied by the caller, bypassing the source.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Ledger` for the first structurally invalid
    /// record.
    pub fn reconcile_records(
        &self,
        records: &[TransactionRecord],
        as_of: NaiveDate,
    ) -> Result<ReconciliationReportDto, UseCaseError> {
        let events = to_events(records)?;
        Ok(report(&events, as_of))
    }
}

fn to_events(records: &[TransactionRecord]) -> Result<Vec<TransactionEvent>, UseCaseError> {
    let events = events_from_records(records).inspect_err(|e| {
        warn!(error = %e, "Rejected transaction batch");
    })?;
    Ok(events)
}

fn report(events: &[TransactionEvent], as_of: NaiveDate) -> ReconciliationReportDto {
    let portfolio = PositionReconciler::reconcile_portfolio(events);
    let underlyings = portfolio.len();
    let reconciliation = Reconciliation::combine(portfolio.into_values());

    for anomaly in reconciliation.anomalies() {
        warn!(
            kind = %anomaly.kind,
            contract_id = %anomaly.contract_id,
            date = %anomaly.date,
            sequence = anomaly.sequence,
            "{}",
            anomaly.message
        );
    }

    info!(
        events = reconciliation.events_processed(),
        underlyings,
        open_positions = reconciliation.open_positions().len(),
        anomalies = reconciliation.anomalies().len(),
        "Reconciliation complete"
    );

    ReconciliationReportDto::from_reconciliation(&reconciliation, as_of)
}
