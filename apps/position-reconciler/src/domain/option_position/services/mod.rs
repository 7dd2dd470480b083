//! Option Position Domain Services
//!
//! Stateless reconciliation logic over ledger events.

mod position_reconciler;

pub use position_reconciler::{FoldStep, PositionReconciler};
