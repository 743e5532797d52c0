//! cashcast-core
//!
//! Recurrence expansion and balance forecasting services for Cashcast.
//! Depends on cashcast-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod error;
pub mod forecast_service;
pub mod recurrence_service;
pub mod source;
pub mod time;


pub use error::CoreError;
pub use forecast_service::*;
pub use recurrence_service::*;
pub use source::*;
pub use time::*;
