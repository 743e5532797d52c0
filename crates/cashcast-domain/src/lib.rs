//! cashcast-domain
//!
//! Pure domain models for cash-flow forecasting: accounts, bills, transactions,
//! overrides, recurrence rules and forecast results.
//! No I/O, no CLI, no storage. Only data types, calendar arithmetic and enums.

pub mod account;
pub mod bill;
pub mod common;
pub mod forecast;
pub mod overrides;
pub mod portfolio;
pub mod recurrence;
pub mod transaction;

pub use account::*;
pub use bill::*;
pub use common::*;
pub use forecast::*;
pub use overrides::*;
pub use portfolio::*;
pub use recurrence::{RecurrenceError, RecurrenceRule};
pub use transaction::*;
