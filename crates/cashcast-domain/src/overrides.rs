//! Per-occurrence forecast overrides and their lookup table.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::EventKind;

/// Identifies one occurrence of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverrideKey {
    pub kind: EventKind,
    pub event_id: Uuid,
    pub date: NaiveDate,
}

impl OverrideKey {
    pub fn new(kind: EventKind, event_id: Uuid, date: NaiveDate) -> Self {
        Self {
            kind,
            event_id,
            date,
        }
    }
}

/// A stored override record, as handed over by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOverride {
    pub account_id: Uuid,
    pub event_type: EventKind,
    pub event_id: Uuid,
    pub event_date: NaiveDate,
    #[serde(default)]
    pub skip: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_amount: Option<f64>,
}

impl ForecastOverride {
    pub fn skip(account_id: Uuid, kind: EventKind, event_id: Uuid, date: NaiveDate) -> Self {
        Self {
            account_id,
            event_type: kind,
            event_id,
            event_date: date,
            skip: true,
            override_amount: None,
        }
    }

    pub fn amount(
        account_id: Uuid,
        kind: EventKind,
        event_id: Uuid,
        date: NaiveDate,
        amount: f64,
    ) -> Self {
        Self {
            account_id,
            event_type: kind,
            event_id,
            event_date: date,
            skip: false,
            override_amount: Some(amount),
        }
    }

    pub fn key(&self) -> OverrideKey {
        OverrideKey::new(self.event_type, self.event_id, self.event_date)
    }

    pub fn action(&self) -> OverrideAction {
        OverrideAction {
            skip: self.skip,
            amount: self.override_amount,
        }
    }
}

/// What an override does to the single occurrence it targets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverrideAction {
    pub skip: bool,
    pub amount: Option<f64>,
}

impl OverrideAction {
    /// Unsigned amount an occurrence contributes, or `None` when skipped.
    pub fn resolve(&self, default_amount: f64) -> Option<f64> {
        if self.skip {
            None
        } else {
            Some(self.amount.unwrap_or(default_amount))
        }
    }
}

/// Immutable lookup of overrides for one forecast invocation.
///
/// Built from a list of records; for duplicate keys the later record wins.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: HashMap<OverrideKey, OverrideAction>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: &ForecastOverride) {
        self.entries.insert(record.key(), record.action());
    }

    pub fn get(&self, key: &OverrideKey) -> Option<&OverrideAction> {
        self.entries.get(key)
    }

    /// Unsigned amount for the occurrence at `key`, `None` when it is skipped.
    pub fn resolve(&self, key: &OverrideKey, default_amount: f64) -> Option<f64> {
        match self.entries.get(key) {
            Some(action) => action.resolve(default_amount),
            None => Some(default_amount),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &OverrideKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a ForecastOverride> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = &'a ForecastOverride>>(iter: I) -> Self {
        let mut table = OverrideTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_records_replace_earlier_ones() {
        let account = Uuid::new_v4();
        let bill = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let records = [
            ForecastOverride::skip(account, EventKind::Bill, bill, date),
            ForecastOverride::amount(account, EventKind::Bill, bill, date, 4.5),
        ];
        let table: OverrideTable = records.iter().collect();

        assert_eq!(table.len(), 1);
        let key = OverrideKey::new(EventKind::Bill, bill, date);
        assert_eq!(table.resolve(&key, 10.0), Some(4.5));
    }

    #[test]
    fn keys_distinguish_event_kind() {
        let account = Uuid::new_v4();
        let id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let table: OverrideTable = [ForecastOverride::skip(account, EventKind::Bill, id, date)]
            .iter()
            .collect();

        assert_eq!(table.resolve(&OverrideKey::new(EventKind::Bill, id, date), 7.0), None);
        assert_eq!(
            table.resolve(&OverrideKey::new(EventKind::Transaction, id, date), 7.0),
            Some(7.0)
        );
    }

    #[test]
    fn skip_wins_over_amount_on_the_same_record() {
        let action = OverrideAction {
            skip: true,
            amount: Some(3.0),
        };
        assert_eq!(action.resolve(10.0), None);
    }
}
