//! Traits defining the contract with the Spark data API.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use sparksync_core::accounts::Account;
use sparksync_core::errors::Result;

/// Authenticated access to one Spark user's accounts.
///
/// Record-returning methods yield records already passed through the key
/// normalizer.
#[async_trait]
pub trait SparkApi: Send + Sync {
    /// List all accounts under the user (`DataProvider/GetStaticData`).
    async fn get_accounts(&self) -> Result<Vec<Account>>;

    /// Current holdings of an account (`Account/GetHoldings`).
    async fn get_holdings(&self, account: &Account) -> Result<Vec<Value>>;

    /// Transactions of an account in `[from, to]` (`Account/GetAccountTransactions`).
    async fn get_transactions(
        &self,
        account: &Account,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Value>>;

    /// Total account value (`Account/GetAccountSecurities`).
    async fn get_account_balance(&self, account: &Account) -> Result<Decimal>;
}

/// Opens an authenticated Spark session.
#[async_trait]
pub trait SparkConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn SparkApi>>;
}
