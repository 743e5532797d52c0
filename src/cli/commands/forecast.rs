use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tracing::{info, warn};

use crate::cli::output::{self, OutputPreferences};
use crate::cli::ForecastArgs;
use crate::config::Config;
use crate::errors::CashcastError;
use crate::services::{
    portfolio_warnings, AccountForecast, ForecastRequest, ForecastService, Horizon,
    InMemorySource, SystemClock,
};
use crate::utils::snapshot::load_portfolio_from_file;

pub fn run_forecast(
    args: &ForecastArgs,
    config: &Config,
    json: bool,
    prefs: &OutputPreferences,
    out: &mut dyn Write,
) -> Result<(), CashcastError> {
    let forecast = compute(args, config)?;
    if json {
        let body = json!({
            "account_id": forecast.account.id,
            "today": forecast.result.today,
            "end_date": forecast.result.end_date,
            "buffer_amount": forecast.result.buffer_amount,
            "balances": forecast.result.balances,
            "alerts": forecast.result.alerts,
            "events": forecast.events,
        });
        serde_json::to_writer_pretty(&mut *out, &body)?;
        writeln!(out)?;
        return Ok(());
    }
    output::render_balances(out, &forecast.account, &forecast.result, prefs)?;
    output::render_alerts(out, &forecast.result, prefs)?;
    output::render_events(out, &forecast.events, prefs)?;
    Ok(())
}

pub fn run_alerts(
    args: &ForecastArgs,
    config: &Config,
    json: bool,
    prefs: &OutputPreferences,
    out: &mut dyn Write,
) -> Result<(), CashcastError> {
    let forecast = compute(args, config)?;
    if json {
        let body = json!({
            "account_id": forecast.account.id,
            "buffer_amount": forecast.result.buffer_amount,
            "alerts": forecast.result.alerts,
        });
        serde_json::to_writer_pretty(&mut *out, &body)?;
        writeln!(out)?;
        return Ok(());
    }
    output::render_alerts(out, &forecast.result, prefs)?;
    Ok(())
}

fn compute(args: &ForecastArgs, config: &Config) -> Result<AccountForecast, CashcastError> {
    let path = snapshot_path(args, config)?;
    let portfolio = load_portfolio_from_file(&path)?;
    for warning in portfolio_warnings(&portfolio) {
        warn!(snapshot = %path.display(), "{warning}");
    }

    let horizon = match (args.days, args.months) {
        (Some(days), _) => Horizon::Days(days),
        (None, Some(months)) => Horizon::Months(months),
        (None, None) => Horizon::Months(config.forecast_horizon_months),
    };
    let mut request =
        ForecastRequest::new(horizon, args.buffer.unwrap_or(config.buffer_amount));
    if let Some(today) = args.today {
        request = request.starting(today);
    }

    let source = InMemorySource::new(portfolio);
    let forecast = ForecastService::forecast_account(&source, args.account, &request, &SystemClock)?;
    info!(
        account = %forecast.account.id,
        days = forecast.result.balances.len(),
        alerts = forecast.result.alerts.len(),
        "forecast ready"
    );
    Ok(forecast)
}

fn snapshot_path(args: &ForecastArgs, config: &Config) -> Result<PathBuf, CashcastError> {
    args.snapshot
        .clone()
        .or_else(|| config.default_snapshot.clone())
        .ok_or_else(|| {
            CashcastError::Usage(
                "no snapshot given; pass --snapshot or run `config set-snapshot <path>`".into(),
            )
        })
}
