//! Balance forecasting: projects bills and transactions over a horizon,
//! applies overrides and flags dates that dip below the buffer.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use cashcast_domain::{
    recurrence, AccountSnapshot, Bill, DailyLedger, ForecastEvent, ForecastOverride,
    ForecastResult, ForecastWindow, Identifiable, OverrideKey, OverrideTable, ScheduledEvent,
    Transaction,
};

use crate::{source::ForecastSource, time::Clock, CoreError, SystemClock};

/// Fixed month length used when a horizon is expressed in months.
pub const DAYS_PER_MONTH: u32 = 30;
pub const MAX_HORIZON_MONTHS: u32 = 12;

/// How far ahead a forecast looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Days(u32),
    /// Whole months of [`DAYS_PER_MONTH`] days each, between 1 and [`MAX_HORIZON_MONTHS`].
    Months(u32),
}

impl Horizon {
    pub fn days(self) -> Result<u32, CoreError> {
        match self {
            Horizon::Days(0) => Err(CoreError::Validation(
                "horizon must cover at least one day".into(),
            )),
            Horizon::Days(days) => Ok(days),
            Horizon::Months(months) if (1..=MAX_HORIZON_MONTHS).contains(&months) => {
                Ok(months * DAYS_PER_MONTH)
            }
            Horizon::Months(months) => Err(CoreError::Validation(format!(
                "horizon of {months} months is outside 1..={MAX_HORIZON_MONTHS}"
            ))),
        }
    }
}

/// Parameters for an account-level forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub horizon: Horizon,
    pub buffer_amount: f64,
    /// Day 0 of the forecast; the clock supplies it when absent.
    pub today: Option<NaiveDate>,
}

impl ForecastRequest {
    pub fn new(horizon: Horizon, buffer_amount: f64) -> Self {
        Self {
            horizon,
            buffer_amount,
            today: None,
        }
    }

    pub fn starting(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

/// Forecast for one account together with the occurrences that drive it.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountForecast {
    pub account: AccountSnapshot,
    pub result: ForecastResult,
    pub events: Vec<ForecastEvent>,
}

/// One occurrence after override resolution.
#[derive(Debug, Clone, Copy)]
struct Contribution {
    date: NaiveDate,
    signed_amount: f64,
    skipped: bool,
    overridden: bool,
}

pub struct ForecastService;

impl ForecastService {
    /// Projects daily balances for `account` over `horizon_days` dates starting at `today`.
    ///
    /// `today` falls back to the system date when absent.
    pub fn forecast(
        account: &AccountSnapshot,
        bills: &[Bill],
        transactions: &[Transaction],
        horizon_days: u32,
        buffer_amount: f64,
        overrides: &[ForecastOverride],
        today: Option<NaiveDate>,
    ) -> Result<ForecastResult, CoreError> {
        Self::validate(horizon_days, buffer_amount)?;
        let today = today.unwrap_or_else(|| SystemClock.today());
        let window = Self::window(today, horizon_days)?;
        let table: OverrideTable = overrides.iter().collect();
        for stale in overrides
            .iter()
            .filter(|record| !window.contains(record.event_date))
        {
            warn!(
                event = %stale.event_id,
                date = %stale.event_date,
                "override falls outside the forecast window"
            );
        }

        let mut ledger = DailyLedger::new();
        let mut occurrences = 0usize;
        for contribution in Self::contributions(bills, transactions, &table, window) {
            if !contribution.skipped {
                ledger.record(contribution.date, contribution.signed_amount);
            }
            occurrences += 1;
        }

        let mut balances = BTreeMap::new();
        let mut alerts = Vec::new();
        let mut balance = account.current_balance;
        for date in window.days() {
            balance += ledger.amount_on(date);
            balances.insert(date, balance);
            if balance < buffer_amount {
                alerts.push(date);
            }
        }

        debug!(
            account = %account.id,
            %today,
            horizon_days,
            bills = bills.len(),
            transactions = transactions.len(),
            overrides = table.len(),
            occurrences,
            alerts = alerts.len(),
            "forecast computed"
        );

        Ok(ForecastResult {
            today,
            end_date: window.end,
            buffer_amount,
            balances,
            alerts,
        })
    }

    /// Dates within the horizon whose projected balance is below `buffer_amount`.
    pub fn alerts(
        account: &AccountSnapshot,
        bills: &[Bill],
        transactions: &[Transaction],
        horizon_days: u32,
        buffer_amount: f64,
        overrides: &[ForecastOverride],
        today: Option<NaiveDate>,
    ) -> Result<Vec<NaiveDate>, CoreError> {
        Self::forecast(
            account,
            bills,
            transactions,
            horizon_days,
            buffer_amount,
            overrides,
            today,
        )
        .map(|result| result.alerts)
    }

    /// Every bill and transaction occurrence inside `window`, ordered by date.
    pub fn events(
        bills: &[Bill],
        transactions: &[Transaction],
        overrides: &[ForecastOverride],
        window: ForecastWindow,
    ) -> Vec<ForecastEvent> {
        let table: OverrideTable = overrides.iter().collect();
        let mut events: Vec<ForecastEvent> = bills
            .iter()
            .map(|bill| (bill as &dyn ScheduledEvent, bill.id))
            .chain(
                transactions
                    .iter()
                    .map(|txn| (txn as &dyn ScheduledEvent, txn.id)),
            )
            .flat_map(|(event, id)| {
                Self::schedule(event, &table, window)
                    .into_iter()
                    .map(move |contribution| ForecastEvent {
                        kind: event.kind(),
                        event_id: id,
                        name: event.name().to_string(),
                        date: contribution.date,
                        amount: if contribution.skipped {
                            0.0
                        } else {
                            contribution.signed_amount
                        },
                        skipped: contribution.skipped,
                        overridden: contribution.overridden,
                    })
            })
            .collect();
        events.sort_by(|a, b| {
            (a.date, a.kind, &a.name, a.event_id).cmp(&(b.date, b.kind, &b.name, b.event_id))
        });
        events
    }

    /// Looks the account up through `source` and forecasts it.
    ///
    /// A missing account is reported as [`CoreError::AccountNotFound`]; the
    /// balance is never defaulted.
    pub fn forecast_account(
        source: &dyn ForecastSource,
        account_id: Uuid,
        request: &ForecastRequest,
        clock: &dyn Clock,
    ) -> Result<AccountForecast, CoreError> {
        let horizon_days = request.horizon.days()?;
        Self::validate(horizon_days, request.buffer_amount)?;
        let today = request.today.unwrap_or_else(|| clock.today());
        let window = Self::window(today, horizon_days)?;
        let account = source
            .account(account_id)?
            .ok_or(CoreError::AccountNotFound(account_id))?;

        let bills = source.bills(account_id)?;
        let transactions = source.transactions(account_id)?;
        let overrides = source.overrides(account_id, window)?;

        let result = Self::forecast(
            &account,
            &bills,
            &transactions,
            horizon_days,
            request.buffer_amount,
            &overrides,
            Some(today),
        )?;
        let events = Self::events(&bills, &transactions, &overrides, window);
        Ok(AccountForecast {
            account,
            result,
            events,
        })
    }

    fn validate(horizon_days: u32, buffer_amount: f64) -> Result<(), CoreError> {
        if horizon_days == 0 {
            return Err(CoreError::Validation(
                "horizon must cover at least one day".into(),
            ));
        }
        if !buffer_amount.is_finite() || buffer_amount < 0.0 {
            return Err(CoreError::Validation(format!(
                "buffer amount must be a non-negative number, got {buffer_amount}"
            )));
        }
        Ok(())
    }

    fn window(today: NaiveDate, horizon_days: u32) -> Result<ForecastWindow, CoreError> {
        ForecastWindow::from_horizon(today, horizon_days).ok_or_else(|| {
            CoreError::Validation(format!(
                "a {horizon_days}-day horizon from {today} runs past the supported calendar"
            ))
        })
    }

    fn contributions<'a>(
        bills: &'a [Bill],
        transactions: &'a [Transaction],
        table: &'a OverrideTable,
        window: ForecastWindow,
    ) -> impl Iterator<Item = Contribution> + 'a {
        let bills = bills
            .iter()
            .flat_map(move |bill| Self::schedule(bill, table, window));
        let transactions = transactions
            .iter()
            .flat_map(move |txn| Self::schedule(txn, table, window));
        bills.chain(transactions)
    }

    /// Expands one event inside `window` and resolves each occurrence's override.
    fn schedule(
        event: &dyn ScheduledEvent,
        table: &OverrideTable,
        window: ForecastWindow,
    ) -> Vec<Contribution> {
        let kind = event.kind();
        let bound = event
            .end_date()
            .map_or(window.end, |end| end.min(window.end));
        recurrence::occurrences(event.anchor_date(), event.rule(), Some(bound))
            .filter(|date| window.contains(*date))
            .map(|date| {
                let key = OverrideKey::new(kind, event.id(), date);
                let action = table.get(&key);
                let resolved = table.resolve(&key, event.amount());
                Contribution {
                    date,
                    signed_amount: kind.sign() * resolved.unwrap_or(0.0),
                    skipped: resolved.is_none(),
                    overridden: action.is_some(),
                }
            })
            .collect()
    }
}
