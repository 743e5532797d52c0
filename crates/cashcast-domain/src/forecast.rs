//! Forecast accumulators and results.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::EventKind;

/// Closed date range `[start, end]` covered by a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ForecastWindow {
    /// Window of `days` consecutive dates beginning at `start`. `days` must be at least 1.
    ///
    /// Returns `None` when the last date would fall outside the calendar range.
    pub fn from_horizon(start: NaiveDate, days: u32) -> Option<Self> {
        let span = i64::from(days.max(1)) - 1;
        let end = start.checked_add_signed(Duration::days(span))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |date| date.succ_opt())
            .take_while(move |date| *date <= end)
    }

    pub fn len(&self) -> usize {
        ((self.end - self.start).num_days() + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Signed net amount per date. Dates never touched read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyLedger {
    amounts: BTreeMap<NaiveDate, f64>,
}

impl DailyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, signed_amount: f64) {
        *self.amounts.entry(date).or_insert(0.0) += signed_amount;
    }

    pub fn amount_on(&self, date: NaiveDate) -> f64 {
        self.amounts.get(&date).copied().unwrap_or(0.0)
    }

    /// Dates with at least one recorded contribution.
    pub fn active_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.amounts.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }
}

/// Outcome of one forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub today: NaiveDate,
    pub end_date: NaiveDate,
    pub buffer_amount: f64,
    /// Cumulative balance for every date in `[today, end_date]`.
    pub balances: BTreeMap<NaiveDate, f64>,
    /// Dates whose balance is below `buffer_amount`, ascending.
    pub alerts: Vec<NaiveDate>,
}

impl ForecastResult {
    pub fn balance_on(&self, date: NaiveDate) -> Option<f64> {
        self.balances.get(&date).copied()
    }

    pub fn closing_balance(&self) -> Option<f64> {
        self.balances.values().next_back().copied()
    }

    /// Earliest date holding the minimum projected balance.
    pub fn lowest_balance(&self) -> Option<(NaiveDate, f64)> {
        self.balances
            .iter()
            .fold(None, |lowest: Option<(NaiveDate, f64)>, (date, balance)| {
                match lowest {
                    Some((_, current)) if current <= *balance => lowest,
                    _ => Some((*date, *balance)),
                }
            })
    }

    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// One scheduled occurrence inside the forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEvent {
    pub kind: EventKind,
    pub event_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    /// Signed contribution to the balance; zero when skipped.
    pub amount: f64,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub overridden: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn ledger_reads_zero_for_untouched_dates() {
        let mut ledger = DailyLedger::new();
        ledger.record(d(2024, 1, 2), -10.0);
        ledger.record(d(2024, 1, 2), 4.0);

        assert_eq!(ledger.amount_on(d(2024, 1, 1)), 0.0);
        assert_eq!(ledger.amount_on(d(2024, 1, 2)), -6.0);
        assert_eq!(ledger.active_dates().count(), 1);
    }

    #[test]
    fn window_covers_horizon_inclusive() {
        let window = ForecastWindow::from_horizon(d(2024, 2, 27), 4).unwrap();
        assert_eq!(window.end, d(2024, 3, 1));
        assert_eq!(window.len(), 4);
        assert_eq!(window.days().count(), 4);
        assert!(window.contains(d(2024, 2, 29)));
        assert!(!window.contains(d(2024, 3, 2)));

        let single = ForecastWindow::from_horizon(d(2024, 2, 27), 1).unwrap();
        assert_eq!(single.start, single.end);
    }

    #[test]
    fn window_past_calendar_range_is_rejected() {
        assert_eq!(ForecastWindow::from_horizon(NaiveDate::MAX, 5), None);
        assert_eq!(ForecastWindow::from_horizon(d(2024, 6, 10), 200_000_000), None);
        let last = ForecastWindow::from_horizon(NaiveDate::MAX, 1).unwrap();
        assert_eq!(last.end, NaiveDate::MAX);
        assert_eq!(last.days().collect::<Vec<_>>(), vec![NaiveDate::MAX]);
    }

    #[test]
    fn lowest_balance_prefers_earliest_minimum() {
        let balances = BTreeMap::from([
            (d(2024, 1, 1), 50.0),
            (d(2024, 1, 2), 20.0),
            (d(2024, 1, 3), 20.0),
            (d(2024, 1, 4), 70.0),
        ]);
        let result = ForecastResult {
            today: d(2024, 1, 1),
            end_date: d(2024, 1, 4),
            buffer_amount: 25.0,
            balances,
            alerts: vec![d(2024, 1, 2), d(2024, 1, 3)],
        };

        assert_eq!(result.lowest_balance(), Some((d(2024, 1, 2), 20.0)));
        assert_eq!(result.closing_balance(), Some(70.0));
        assert!(result.has_alerts());
    }
}
