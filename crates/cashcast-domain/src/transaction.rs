//! Transactions: one-off or recurring credits into an account.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;
use crate::recurrence::RecurrenceRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(account_id: Uuid, name: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_id,
            name: name.into(),
            amount,
            date,
            is_recurring: false,
            recurrence: None,
            end_date: None,
            notes: None,
        }
    }

    /// Marks the transaction as recurring under `rule`.
    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.is_recurring = true;
        self.recurrence = Some(rule);
        self
    }

    pub fn ending(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl ScheduledEvent for Transaction {
    fn kind(&self) -> EventKind {
        EventKind::Transaction
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn anchor_date(&self) -> NaiveDate {
        self.date
    }

    /// A rule only counts when the recurring flag is also set.
    fn rule(&self) -> RecurrenceRule {
        if self.is_recurring {
            self.recurrence.unwrap_or_default()
        } else {
            RecurrenceRule::None
        }
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_requires_recurring_flag() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut txn = Transaction::new(Uuid::new_v4(), "Salary", 100.0, date);
        txn.recurrence = Some(RecurrenceRule::Monthly);
        assert_eq!(txn.rule(), RecurrenceRule::None);

        let txn = txn.with_recurrence(RecurrenceRule::Monthly);
        assert_eq!(txn.rule(), RecurrenceRule::Monthly);
        assert_eq!(txn.kind().sign(), 1.0);
    }

    #[test]
    fn deserializes_loose_rule_strings() {
        let json = r#"{
            "id": "6f1b3f5e-2c4e-4a53-9a7e-2d0c7b0f6a10",
            "account_id": "0d9f4c1a-5b7e-4e62-8f3a-1a2b3c4d5e6f",
            "name": "Paycheck",
            "amount": 1200.0,
            "date": "2024-01-31",
            "is_recurring": true,
            "recurrence": "eom"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.rule(), RecurrenceRule::EndOfMonth);
        assert_eq!(txn.end_date, None);
    }
}
