use std::io::Write;

use chrono::NaiveDate;

use crate::errors::CashcastError;
use crate::services::RecurrenceService;

pub fn run(
    anchor: NaiveDate,
    rule: Option<&str>,
    end: Option<NaiveDate>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CashcastError> {
    let dates = RecurrenceService::expand(anchor, rule, end)?;
    if json {
        serde_json::to_writer(&mut *out, &dates)?;
        writeln!(out)?;
        return Ok(());
    }
    for date in dates {
        writeln!(out, "{date}")?;
    }
    Ok(())
}
