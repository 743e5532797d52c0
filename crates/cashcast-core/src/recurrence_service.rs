//! Services that expand recurrence rules into concrete dates.

use chrono::NaiveDate;
use tracing::{debug, warn};

use cashcast_domain::recurrence::{self, RecurrenceRule, MAX_OCCURRENCES};

use crate::CoreError;

/// String-facing entry point for occurrence expansion.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Validates a stored rule string. Absent or blank input means no recurrence.
    pub fn parse_rule(value: Option<&str>) -> Result<RecurrenceRule, CoreError> {
        Ok(RecurrenceRule::from_optional(value)?)
    }

    /// Expands `rule` from `anchor` up to and including `end`.
    ///
    /// Fails with [`CoreError::InvalidRecurrenceRule`] on unrecognized, non-empty rule
    /// strings (matched case-insensitively).
    pub fn expand(
        anchor: NaiveDate,
        rule: Option<&str>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<NaiveDate>, CoreError> {
        let rule = Self::parse_rule(rule)?;
        Ok(Self::expand_rule(anchor, rule, end))
    }

    pub fn expand_rule(
        anchor: NaiveDate,
        rule: RecurrenceRule,
        end: Option<NaiveDate>,
    ) -> Vec<NaiveDate> {
        let dates = recurrence::expand(anchor, rule, end);
        if end.is_none() && rule.is_recurring() && dates.len() == MAX_OCCURRENCES {
            warn!(
                %anchor,
                %rule,
                limit = MAX_OCCURRENCES,
                "unbounded recurrence truncated"
            );
        }
        debug!(%anchor, %rule, count = dates.len(), "expanded recurrence");
        dates
    }

    /// First occurrence on or after `reference`, if the series reaches it.
    pub fn next_occurrence(
        anchor: NaiveDate,
        rule: RecurrenceRule,
        end: Option<NaiveDate>,
        reference: NaiveDate,
    ) -> Option<NaiveDate> {
        recurrence::occurrences(anchor, rule, end).find(|date| *date >= reference)
    }
}
