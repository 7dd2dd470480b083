//! Option Position Bounded Context
//!
//! Reduces a transaction ledger to open option positions:
//! - Contract descriptors parsed from ledger contract ids
//! - Open positions with signed net quantity
//! - Anomalies surfaced while folding (unmatched closes, over-closes,
//!   unknown actions)

pub mod reconciliation;
pub mod services;
pub mod value_objects;

pub use reconciliation::Reconciliation;
pub use services::{FoldStep, PositionReconciler};
pub use value_objects::{Anomaly, AnomalyKind, OpenPosition, OptionContract, OptionRight};
