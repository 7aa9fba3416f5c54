//! Per-run scrape results handed from the broker client to the stores.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::Account;
use crate::holdings::HoldingRow;
use crate::transactions::TransactionRow;

/// Everything scraped from one broker account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub account: Account,
    pub balance: Option<Decimal>,
    pub holdings: Vec<HoldingRow>,
    pub transactions: Vec<TransactionRow>,
}

impl AccountData {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            balance: None,
            holdings: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

/// Result of one scrape run across accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub accounts: Vec<AccountData>,
}

impl ScrapeResult {
    pub fn new(accounts: Vec<AccountData>) -> Self {
        Self { accounts }
    }

    pub fn holdings(&self) -> impl Iterator<Item = &HoldingRow> {
        self.accounts.iter().flat_map(|a| a.holdings.iter())
    }

    pub fn transactions(&self) -> impl Iterator<Item = &TransactionRow> {
        self.accounts.iter().flat_map(|a| a.transactions.iter())
    }

    /// True when there is nothing for the stores to write.
    pub fn is_empty(&self) -> bool {
        self.accounts
            .iter()
            .all(|a| a.holdings.is_empty() && a.transactions.is_empty())
    }
}
