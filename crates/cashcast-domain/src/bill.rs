//! Bills: recurring or one-off expenses drawn from an account.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;
use crate::recurrence::RecurrenceRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    /// Magnitude of the expense; always subtracted from the balance.
    pub amount: f64,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Bill {
    pub fn new(
        account_id: Uuid,
        name: impl Into<String>,
        amount: f64,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            name: name.into(),
            amount,
            start_date,
            end_date: None,
            recurrence: None,
            notes: None,
        }
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

impl Identifiable for Bill {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl ScheduledEvent for Bill {
    fn kind(&self) -> EventKind {
        EventKind::Bill
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn anchor_date(&self) -> NaiveDate {
        self.start_date
    }

    fn rule(&self) -> RecurrenceRule {
        self.recurrence.unwrap_or_default()
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}
