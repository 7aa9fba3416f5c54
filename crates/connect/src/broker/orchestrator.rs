//! Sync pipeline driver.
//!
//! Sequences login, account scraping, holding transformation and store
//! writes, reporting progress and failures through a [`Notifier`].

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error, info, warn};

use sparksync_core::accounts::Account;
use sparksync_core::errors::{Error, Result};
use sparksync_core::holdings::HoldingTransformer;
use sparksync_core::notifier::{summary_message, Notifier};
use sparksync_core::storage::{SaveOutcome, StorageSet};
use sparksync_core::transactions::transactions_from_records;
use sparksync_core::{AccountData, ScrapeResult};

use super::traits::{SparkApi, SparkConnector};

/// Configuration for a sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Scrape every account instead of only the first one.
    pub all_accounts: bool,
    /// First day of the transactions window.
    pub transactions_start: NaiveDate,
    /// Company identifier used in transaction hashes (`spark-{broker}`).
    pub company_id: String,
}

/// How a run ended. Failures have already been reported by the time this is
/// returned.
#[derive(Debug)]
pub enum RunStatus {
    /// Rows were handed to the stores (some stores may still have failed).
    Completed(SaveOutcome),
    /// No store is configured; nothing was scraped.
    NoStorages,
    /// The run aborted with an error.
    Failed,
}

/// Drives one scrape-and-save run.
///
/// # Example
///
/// ```ignore
/// let orchestrator = SyncOrchestrator::new(connector, transformer, storages, notifier, config);
/// let status = orchestrator.run().await;
/// ```
pub struct SyncOrchestrator {
    connector: Arc<dyn SparkConnector>,
    transformer: Arc<HoldingTransformer>,
    storages: StorageSet,
    notifier: Arc<dyn Notifier>,
    config: SyncConfig,
}

impl SyncOrchestrator {
    pub fn new(
        connector: Arc<dyn SparkConnector>,
        transformer: Arc<HoldingTransformer>,
        storages: StorageSet,
        notifier: Arc<dyn Notifier>,
        config: SyncConfig,
    ) -> Self {
        Self {
            connector,
            transformer,
            storages,
            notifier,
            config,
        }
    }

    /// Run the full pipeline. Always logs start and end, and reports every
    /// failure through the notifier.
    pub async fn run(&self) -> RunStatus {
        info!("Scraping started");
        let message = self.notifier.send("Starting...").await;

        let status = if self.storages.is_empty() {
            warn!("No storages found, aborting");
            self.notifier
                .edit_message(message.as_ref(), "No storages found, aborting")
                .await;
            RunStatus::NoStorages
        } else {
            let (scraped, initialized) =
                futures::join!(self.scrape(), self.storages.initialize_all());

            match (scraped, initialized) {
                (Ok(results), Ok(())) => {
                    let outcome = self.storages.save_results(&results).await;
                    for failure in &outcome.failures {
                        self.notifier.send_error(&failure.error, &failure.store).await;
                    }
                    self.notifier
                        .edit_message(message.as_ref(), &summary_message(&results, &outcome.stats))
                        .await;
                    RunStatus::Completed(outcome)
                }
                (Err(e), _) => {
                    error!("Scrape failed: {}", e);
                    self.notifier.send_error(&e, "scrape").await;
                    RunStatus::Failed
                }
                (Ok(_), Err(e)) => {
                    error!("Storage initialization failed: {}", e);
                    self.notifier.send_error(&e, "initializeStorage").await;
                    RunStatus::Failed
                }
            }
        };

        info!("Scraping ended");
        status
    }

    /// Log in and collect holdings, transactions and balance of the
    /// configured accounts.
    pub async fn scrape(&self) -> Result<ScrapeResult> {
        let api = self.connector.connect().await?;

        debug!("Getting account keys...");
        let accounts = api.get_accounts().await?;
        info!(
            "Account keys found ({}): {}",
            accounts.len(),
            accounts.iter().map(|a| a.key.as_str()).collect::<Vec<_>>().join(", ")
        );

        let selected: Vec<Account> = if self.config.all_accounts {
            accounts
        } else {
            accounts.into_iter().take(1).collect()
        };
        if selected.is_empty() {
            return Err(Error::BrokerApi("No accounts found for user".to_string()));
        }

        let mut results = Vec::with_capacity(selected.len());
        for account in selected {
            results.push(self.scrape_account(api.as_ref(), account).await?);
        }
        Ok(ScrapeResult::new(results))
    }

    async fn scrape_account(&self, api: &dyn SparkApi, account: Account) -> Result<AccountData> {
        info!(
            "Getting data for account {} (account key {})...",
            account.number, account.key
        );

        let (from, to) = self.transactions_window();
        let (holdings, transactions, balance) = futures::join!(
            api.get_holdings(&account),
            api.get_transactions(&account, from, to),
            api.get_account_balance(&account)
        );
        let holdings = holdings?;
        let transactions = transactions?;
        let balance = balance?;

        let (rows, report) = self.transformer.transform_all(&holdings).await;
        debug!(
            "Account {}: {} of {} holdings resolved, balance {}",
            account.number, report.resolved, report.total, balance
        );

        let mut data = AccountData::new(account);
        data.transactions =
            transactions_from_records(&transactions, &self.config.company_id, &data.account.number);
        data.holdings = rows;
        data.balance = Some(balance);
        Ok(data)
    }

    fn transactions_window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let from = self
            .config
            .transactions_start
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        (from, Utc::now())
    }
}
