// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_collect,
        clippy::items_after_statements
    )
)]

//! Position Reconciler - Rust Core Library
//!
//! Reduces a brokerage transaction ledger to the set of currently open
//! option contracts, surfacing ledger inconsistencies as anomalies.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (value objects, domain services)
//!   - `ledger`: Transaction records, actions, events
//!   - `option_position`: Open positions, anomalies, the position reconciler
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`TransactionSourcePort`)
//!   - `use_cases`: `ReconcilePositions`
//!   - `dto`: Report shapes for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `source`: In-memory, JSON file, and REST transaction sources
//!   - `http`: Axum REST API
//!
//! # Example
//!
//! ```rust
//! use position_reconciler::{PositionReconciler, TransactionRecord};
//! use rust_decimal::Decimal;
//!
//! let contract = "CLSK Jul 25 '25 $9 Call";
//! let records = vec![
//!     TransactionRecord::new("2025-06-23", "Sold Short", contract, Some(Decimal::ONE)),
//!     TransactionRecord::new("2025-07-26", "Option Assigned", contract, None),
//! ];
//!
//! let reconciliation = PositionReconciler::reconcile_records(&records).unwrap();
//! assert!(reconciliation.open_positions().is_empty());
//! assert!(reconciliation.is_clean());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Ambient Modules
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// API error codes and HTTP mapping.
pub mod error;

/// Tracing subscriber setup.
pub mod observability;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::ledger::{
    EventAction, LedgerError, TransactionAction, TransactionEvent, TransactionRecord,
};
pub use domain::option_position::{
    Anomaly, AnomalyKind, OpenPosition, OptionContract, OptionRight, PositionReconciler,
    Reconciliation,
};
pub use domain::shared::{ContractId, Symbol};

// Application re-exports
pub use application::dto::{AnomalyDto, OpenPositionDto, ReconciliationReportDto};
pub use application::ports::{SourceError, TransactionSourcePort};
pub use application::use_cases::{
    ReconcilePositionsRequest, ReconcilePositionsUseCase, UseCaseError,
};

// Infrastructure re-exports
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::source::{
    InMemoryTransactionSource, JsonFileTransactionSource, RestTransactionSource, RetryPolicy,
    TransactionSource,
};
