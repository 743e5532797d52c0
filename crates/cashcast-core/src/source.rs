use std::collections::HashSet;

use uuid::Uuid;

use cashcast_domain::{
    AccountSnapshot, Bill, EventKind, ForecastOverride, ForecastWindow, Portfolio, RecurrenceRule,
    Transaction,
};

use crate::CoreError;

/// Read-only access to the records a forecast consumes.
///
/// Implementations are expected to hand back a consistent snapshot; the
/// forecaster never re-fetches or re-validates what it receives.
pub trait ForecastSource: Send + Sync {
    fn account(&self, id: Uuid) -> Result<Option<AccountSnapshot>, CoreError>;
    fn bills(&self, account_id: Uuid) -> Result<Vec<Bill>, CoreError>;
    fn transactions(&self, account_id: Uuid) -> Result<Vec<Transaction>, CoreError>;
    fn overrides(
        &self,
        account_id: Uuid,
        window: ForecastWindow,
    ) -> Result<Vec<ForecastOverride>, CoreError>;
}

/// [`ForecastSource`] over a [`Portfolio`] held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    portfolio: Portfolio,
}

impl InMemorySource {
    pub fn new(portfolio: Portfolio) -> Self {
        Self { portfolio }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }
}

impl From<Portfolio> for InMemorySource {
    fn from(portfolio: Portfolio) -> Self {
        Self::new(portfolio)
    }
}

impl ForecastSource for InMemorySource {
    fn account(&self, id: Uuid) -> Result<Option<AccountSnapshot>, CoreError> {
        Ok(self.portfolio.account(id).cloned())
    }

    fn bills(&self, account_id: Uuid) -> Result<Vec<Bill>, CoreError> {
        Ok(self.portfolio.bills_for(account_id).cloned().collect())
    }

    fn transactions(&self, account_id: Uuid) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.portfolio.transactions_for(account_id).cloned().collect())
    }

    fn overrides(
        &self,
        account_id: Uuid,
        window: ForecastWindow,
    ) -> Result<Vec<ForecastOverride>, CoreError> {
        Ok(self
            .portfolio
            .overrides_for(account_id)
            .filter(|record| window.contains(record.event_date))
            .cloned()
            .collect())
    }
}

/// Detects dangling references and suspicious records within a snapshot.
pub fn portfolio_warnings(portfolio: &Portfolio) -> Vec<String> {
    let account_ids: HashSet<_> = portfolio.accounts.iter().map(|a| a.id).collect();
    let bill_ids: HashSet<_> = portfolio.bills.iter().map(|b| b.id).collect();
    let txn_ids: HashSet<_> = portfolio.transactions.iter().map(|t| t.id).collect();
    let mut warnings = Vec::new();

    for bill in &portfolio.bills {
        if !account_ids.contains(&bill.account_id) {
            warnings.push(format!(
                "bill {} references unknown account {}",
                bill.id, bill.account_id
            ));
        }
        if bill.amount < 0.0 {
            warnings.push(format!(
                "bill {} has a negative amount; bills are always subtracted",
                bill.id
            ));
        }
        if let Some(end) = bill.end_date {
            if end < bill.start_date {
                warnings.push(format!("bill {} ends before it starts", bill.id));
            }
        }
    }

    for txn in &portfolio.transactions {
        if !account_ids.contains(&txn.account_id) {
            warnings.push(format!(
                "transaction {} references unknown account {}",
                txn.id, txn.account_id
            ));
        }
        let rule = txn.recurrence.unwrap_or_default();
        if txn.is_recurring && rule == RecurrenceRule::None {
            warnings.push(format!(
                "transaction {} is flagged recurring but has no rule; treated as one-off",
                txn.id
            ));
        }
        if !txn.is_recurring && rule.is_recurring() {
            warnings.push(format!(
                "transaction {} carries rule {} but is not flagged recurring; rule ignored",
                txn.id, rule
            ));
        }
    }

    for record in &portfolio.overrides {
        let known = match record.event_type {
            EventKind::Bill => bill_ids.contains(&record.event_id),
            EventKind::Transaction => txn_ids.contains(&record.event_id),
        };
        if !known {
            warnings.push(format!(
                "override on {} targets unknown {} {}",
                record.event_date, record.event_type, record.event_id
            ));
        }
    }

    warnings
}
