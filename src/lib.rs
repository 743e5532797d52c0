#![doc(test(attr(deny(warnings))))]

//! Cashcast projects an account's daily cash balance from its bills and
//! transactions, applies per-occurrence overrides and flags the days that
//! fall below a safety buffer.

pub mod cli;
pub mod errors;
pub mod utils;

pub use cashcast_config as config;
pub use cashcast_core as services;
pub use cashcast_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashcast tracing initialized.");
    });
}
