//! Option Position Value Objects

mod anomaly;
mod open_position;
mod option_contract;

pub use anomaly::{Anomaly, AnomalyKind};
pub use open_position::OpenPosition;
pub use option_contract::{OptionContract, OptionRight};
