//! Data Transfer Objects (DTOs)
//!
//! DTOs are used for API boundaries and use case inputs/outputs.

mod reconciliation_dto;

pub use reconciliation_dto::{AnomalyDto, OpenPositionDto, ReconciliationReportDto};
