//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless business logic
//!
//! # Bounded Contexts
//!
//! - [`ledger`]: Brokerage transaction records and option events
//! - [`option_position`]: Position reconciliation and ledger anomalies

pub mod ledger;
pub mod option_position;
pub mod shared;
