use std::{fs, path::Path};

use cashcast_domain::Portfolio;
use tracing::debug;

use crate::errors::CashcastError;

/// Loads a portfolio snapshot from a JSON file.
///
/// Recurrence rules are validated while parsing, so an unknown rule surfaces
/// as a serialization error naming the offending value.
pub fn load_portfolio_from_file(path: &Path) -> Result<Portfolio, CashcastError> {
    let data = fs::read_to_string(path)?;
    let portfolio = parse_portfolio(&data)?;
    debug!(
        path = %path.display(),
        accounts = portfolio.accounts.len(),
        bills = portfolio.bills.len(),
        transactions = portfolio.transactions.len(),
        overrides = portfolio.overrides.len(),
        "loaded portfolio snapshot"
    );
    Ok(portfolio)
}

pub fn parse_portfolio(data: &str) -> Result<Portfolio, CashcastError> {
    Ok(serde_json::from_str(data)?)
}
