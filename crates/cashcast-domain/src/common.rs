//! Shared traits and enums for forecastable events.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recurrence::RecurrenceRule;

/// Distinguishes the two event sources feeding a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Bill,
    Transaction,
}

impl EventKind {
    /// Direction applied to an event's magnitude: bills drain, transactions credit.
    pub fn sign(self) -> f64 {
        match self {
            EventKind::Bill => -1.0,
            EventKind::Transaction => 1.0,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventKind::Bill => "bill",
            EventKind::Transaction => "transaction",
        };
        f.write_str(label)
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bill" => Ok(EventKind::Bill),
            "transaction" => Ok(EventKind::Transaction),
            other => Err(format!("unknown event kind `{other}`")),
        }
    }
}

/// Exposes a stable identifier for snapshot records.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Read-only view over anything the forecaster can schedule.
pub trait ScheduledEvent: Identifiable {
    fn kind(&self) -> EventKind;
    fn name(&self) -> &str;
    /// Unsigned magnitude; the sign comes from [`EventKind::sign`].
    fn amount(&self) -> f64;
    fn anchor_date(&self) -> NaiveDate;
    /// Effective cadence. `RecurrenceRule::None` for one-off events.
    fn rule(&self) -> RecurrenceRule;
    fn end_date(&self) -> Option<NaiveDate>;
}

