//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod contract_id;
mod symbol;

pub use contract_id::ContractId;
pub use symbol::Symbol;
