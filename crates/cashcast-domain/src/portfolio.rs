//! A serializable bundle of every record a forecast may need.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AccountSnapshot, Bill, ForecastOverride, Transaction};

/// Point-in-time copy of accounts and their scheduled events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub accounts: Vec<AccountSnapshot>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub overrides: Vec<ForecastOverride>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&mut self, account: AccountSnapshot) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        id
    }

    pub fn add_bill(&mut self, bill: Bill) -> Uuid {
        let id = bill.id;
        self.bills.push(bill);
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn add_override(&mut self, record: ForecastOverride) {
        self.overrides.push(record);
    }

    pub fn account(&self, id: Uuid) -> Option<&AccountSnapshot> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn bills_for(&self, account_id: Uuid) -> impl Iterator<Item = &Bill> {
        self.bills
            .iter()
            .filter(move |bill| bill.account_id == account_id)
    }

    pub fn transactions_for(&self, account_id: Uuid) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |txn| txn.account_id == account_id)
    }

    pub fn overrides_for(&self, account_id: Uuid) -> impl Iterator<Item = &ForecastOverride> {
        self.overrides
            .iter()
            .filter(move |record| record.account_id == account_id)
    }
}
