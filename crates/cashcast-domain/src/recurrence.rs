//! Recurrence rules and occurrence expansion.
//!
//! A rule plus an anchor date describes an occurrence series. Series are
//! produced lazily by [`Occurrences`]; [`expand`] collects them eagerly.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{de::Deserializer, Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Upper bound on the number of dates produced by an unbounded [`expand`].
pub const MAX_OCCURRENCES: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Unsupported recurrence rule: {0}")]
    InvalidRule(String),
}

/// Closed set of recurrence cadences understood by the forecaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurrenceRule {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Last calendar day of every month.
    EndOfMonth,
}

impl RecurrenceRule {
    pub const ALL: [RecurrenceRule; 6] = [
        RecurrenceRule::None,
        RecurrenceRule::Daily,
        RecurrenceRule::Weekly,
        RecurrenceRule::Monthly,
        RecurrenceRule::Yearly,
        RecurrenceRule::EndOfMonth,
    ];

    /// Parses an optional rule string. Absent or blank input means no recurrence.
    pub fn from_optional(value: Option<&str>) -> Result<Self, RecurrenceError> {
        match value {
            Some(raw) => raw.parse(),
            None => Ok(RecurrenceRule::None),
        }
    }

    pub fn is_recurring(self) -> bool {
        self != RecurrenceRule::None
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecurrenceRule::None => "NONE",
            RecurrenceRule::Daily => "DAILY",
            RecurrenceRule::Weekly => "WEEKLY",
            RecurrenceRule::Monthly => "MONTHLY",
            RecurrenceRule::Yearly => "YEARLY",
            RecurrenceRule::EndOfMonth => "END_OF_MONTH",
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "" | "NONE" => Ok(RecurrenceRule::None),
            "DAILY" => Ok(RecurrenceRule::Daily),
            "WEEKLY" => Ok(RecurrenceRule::Weekly),
            "MONTHLY" => Ok(RecurrenceRule::Monthly),
            "YEARLY" => Ok(RecurrenceRule::Yearly),
            "EOM" | "END_OF_MONTH" => Ok(RecurrenceRule::EndOfMonth),
            _ => Err(RecurrenceError::InvalidRule(trimmed.to_string())),
        }
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RecurrenceRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecurrenceRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Lazily produced occurrence series for one `(anchor, rule, end)` triple.
///
/// The iterator is a pure function of its inputs: constructing it twice with
/// the same arguments yields identical sequences. Without an `end` bound a
/// recurring series never terminates on its own.
#[derive(Debug, Clone)]
pub struct Occurrences {
    rule: RecurrenceRule,
    anchor: NaiveDate,
    end: Option<NaiveDate>,
    step: u32,
    cursor: Option<NaiveDate>,
    done: bool,
}

enum Slot {
    Date(NaiveDate),
    /// The period exists but lacks the anchor's day (e.g. 31 February).
    Missing { period_start: NaiveDate },
    Finished,
}

impl Occurrences {
    pub fn new(anchor: NaiveDate, rule: RecurrenceRule, end: Option<NaiveDate>) -> Self {
        Self {
            rule,
            anchor,
            end,
            step: 0,
            cursor: None,
            done: false,
        }
    }

    fn beyond_end(&self, date: NaiveDate) -> bool {
        // One-off events are returned as-is; range filtering is the caller's job.
        self.rule.is_recurring() && matches!(self.end, Some(end) if date > end)
    }

    fn advance(&mut self) -> Slot {
        let step = self.step;
        self.step = self.step.saturating_add(1);
        match self.rule {
            RecurrenceRule::None => {
                if step == 0 {
                    Slot::Date(self.anchor)
                } else {
                    Slot::Finished
                }
            }
            RecurrenceRule::Daily => add_days(self.anchor, i64::from(step)),
            RecurrenceRule::Weekly => add_days(self.anchor, i64::from(step) * 7),
            RecurrenceRule::Monthly => {
                let Some((year, month)) = month_offset(self.anchor, step) else {
                    return Slot::Finished;
                };
                match NaiveDate::from_ymd_opt(year, month, self.anchor.day()) {
                    Some(date) => Slot::Date(date),
                    None => NaiveDate::from_ymd_opt(year, month, 1)
                        .map_or(Slot::Finished, |period_start| Slot::Missing { period_start }),
                }
            }
            RecurrenceRule::Yearly => {
                let Some(year) = i32::try_from(step)
                    .ok()
                    .and_then(|offset| self.anchor.year().checked_add(offset))
                else {
                    return Slot::Finished;
                };
                match NaiveDate::from_ymd_opt(year, self.anchor.month(), self.anchor.day()) {
                    Some(date) => Slot::Date(date),
                    None => NaiveDate::from_ymd_opt(year, 1, 1)
                        .map_or(Slot::Finished, |period_start| Slot::Missing { period_start }),
                }
            }
            RecurrenceRule::EndOfMonth => {
                // Step from the previous month end, never from the anchor.
                let next = match self.cursor {
                    None => Some(last_day_of_month(self.anchor)),
                    Some(previous) => shift_month(previous, 1).map(last_day_of_month),
                };
                match next {
                    Some(date) => {
                        self.cursor = Some(date);
                        Slot::Date(date)
                    }
                    None => Slot::Finished,
                }
            }
        }
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while !self.done {
            match self.advance() {
                Slot::Finished => self.done = true,
                Slot::Missing { period_start } => {
                    if self.beyond_end(period_start) {
                        self.done = true;
                    }
                }
                Slot::Date(date) => {
                    if self.beyond_end(date) {
                        self.done = true;
                    } else {
                        return Some(date);
                    }
                }
            }
        }
        None
    }
}

/// Starts a lazy occurrence series.
pub fn occurrences(anchor: NaiveDate, rule: RecurrenceRule, end: Option<NaiveDate>) -> Occurrences {
    Occurrences::new(anchor, rule, end)
}

/// Collects the occurrence series for `anchor` under `rule`, bounded by `end`.
///
/// Without a rule the result is always `[anchor]`, even when the anchor lies
/// after `end`. A recurring rule without `end` stops after [`MAX_OCCURRENCES`].
pub fn expand(anchor: NaiveDate, rule: RecurrenceRule, end: Option<NaiveDate>) -> Vec<NaiveDate> {
    let series = occurrences(anchor, rule, end);
    if end.is_none() && rule.is_recurring() {
        series.take(MAX_OCCURRENCES).collect()
    } else {
        series.collect()
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month()))
        .unwrap_or(date)
}

/// Moves `date` by whole months, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_offset(date: NaiveDate, months: u32) -> Option<(i32, u32)> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    Some((year, index.rem_euclid(12) as u32 + 1))
}

fn add_days(date: NaiveDate, days: i64) -> Slot {
    date.checked_add_signed(Duration::days(days))
        .map_or(Slot::Finished, Slot::Date)
}
