//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod reconcile_positions;

pub use reconcile_positions::{ReconcilePositionsRequest, ReconcilePositionsUseCase, UseCaseError};
