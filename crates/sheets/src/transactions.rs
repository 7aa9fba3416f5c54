use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use tokio::sync::{OnceCell, RwLock};

use sparksync_core::constants::{HASH_COLUMN, TRANSACTIONS_HEADERS};
use sparksync_core::errors::Result;
use sparksync_core::storage::{plan_transactions_save, SaveStats, Storage, WorksheetBackend};
use sparksync_core::transactions::TransactionRow;
use sparksync_core::ScrapeResult;

use crate::STORAGE_NAME;

/// Appends new transactions to the transactions worksheet, skipping the ones
/// whose hash is already in the sheet.
pub struct TransactionsSheetsStorage {
    backend: Arc<dyn WorksheetBackend>,
    worksheet: String,
    enabled: bool,
    scraped_at: String,
    scraped_by: String,
    /// Hashes already in the sheet, loaded once by `init`.
    existing_hashes: OnceCell<RwLock<HashSet<String>>>,
}

impl TransactionsSheetsStorage {
    pub fn new(
        backend: Arc<dyn WorksheetBackend>,
        worksheet: impl Into<String>,
        enabled: bool,
        scraped_at: impl Into<String>,
        scraped_by: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            worksheet: worksheet.into(),
            enabled,
            scraped_at: scraped_at.into(),
            scraped_by: scraped_by.into(),
            existing_hashes: OnceCell::new(),
        }
    }

    async fn hash_index(&self) -> Result<&RwLock<HashSet<String>>> {
        self.existing_hashes
            .get_or_try_init(|| async {
                self.backend
                    .ensure_worksheet(&self.worksheet, &TRANSACTIONS_HEADERS)
                    .await?;
                let hashes: HashSet<String> = self
                    .backend
                    .get_rows(&self.worksheet)
                    .await?
                    .into_iter()
                    .filter_map(|mut row| row.remove(HASH_COLUMN))
                    .filter(|hash| !hash.is_empty())
                    .collect();
                info!("{} hashes loaded", hashes.len());
                Ok::<_, sparksync_core::Error>(RwLock::new(hashes))
            })
            .await
    }
}

#[async_trait]
impl Storage for TransactionsSheetsStorage {
    fn name(&self) -> &str {
        STORAGE_NAME
    }

    fn table(&self) -> &str {
        &self.worksheet
    }

    fn can_save(&self) -> bool {
        self.enabled
    }

    async fn init(&self) -> Result<()> {
        self.hash_index().await?;
        Ok(())
    }

    async fn save(&self, results: &ScrapeResult) -> Result<SaveStats> {
        let index = self.hash_index().await?;

        let transactions: Vec<TransactionRow> = results.transactions().cloned().collect();
        let plan = {
            let existing = index.read().await;
            plan_transactions_save(STORAGE_NAME, &self.worksheet, &transactions, &existing)
        };

        if !plan.rows.is_empty() {
            let rows = plan
                .rows
                .iter()
                .map(|tx| tx.to_sheet_row(&self.scraped_at, &self.scraped_by))
                .collect();
            self.backend.add_rows(&self.worksheet, rows).await?;

            index
                .write()
                .await
                .extend(plan.rows.iter().map(|tx| tx.hash.clone()));
        }

        Ok(plan.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryWorksheets;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use sparksync_core::accounts::Account;
    use sparksync_core::transactions::TransactionStatus;
    use sparksync_core::AccountData;
    use std::collections::HashMap;

    fn transaction(hash: &str, status: TransactionStatus) -> TransactionRow {
        TransactionRow {
            date: Utc.with_ymd_and_hms(2025, 2, 3, 9, 0, 0).unwrap(),
            charged_amount: dec!(-250),
            description: "Buy".to_string(),
            memo: Some("TEVA".to_string()),
            category: None,
            account: "123456".to_string(),
            hash: hash.to_string(),
            identifier: Some("77".to_string()),
            status,
        }
    }

    fn results(transactions: Vec<TransactionRow>) -> ScrapeResult {
        let mut data = AccountData::new(Account::new("ACC_039-123456", "123456", "Main"));
        data.transactions = transactions;
        ScrapeResult::new(vec![data])
    }

    fn storage(backend: Arc<InMemoryWorksheets>) -> TransactionsSheetsStorage {
        TransactionsSheetsStorage::new(backend, "_spark_transactions", true, "2025-02-04", "spark-sync")
    }

    #[tokio::test]
    async fn test_existing_and_pending_are_skipped() {
        let backend = Arc::new(InMemoryWorksheets::default());
        backend.seed(
            "_spark_transactions",
            &TRANSACTIONS_HEADERS,
            vec![HashMap::from([("hash".to_string(), "H1".to_string())])],
        );
        let storage = storage(backend.clone());

        let stats = storage
            .save(&results(vec![
                transaction("H1", TransactionStatus::Completed),
                transaction("H2", TransactionStatus::Pending),
                transaction("H3", TransactionStatus::Completed),
            ]))
            .await
            .unwrap();

        assert_eq!(stats.total, 3);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.existing, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.skipped, 2);

        let rows = backend.rows("_spark_transactions");
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            vec![
                "02-03-2025", "-250", "Buy", "TEVA", "", "123456", "H3", "", "2025-02-04",
                "spark-sync", "77"
            ]
        );
    }

    #[tokio::test]
    async fn test_second_save_adds_nothing() {
        let backend = Arc::new(InMemoryWorksheets::default());
        let storage = storage(backend.clone());
        let batch = results(vec![
            transaction("H1", TransactionStatus::Completed),
            transaction("H2", TransactionStatus::Completed),
        ]);

        let first = storage.save(&batch).await.unwrap();
        let second = storage.save(&batch).await.unwrap();

        assert_eq!(first.added, 2);
        assert_eq!(second.added, 0);
        assert_eq!(second.existing, 2);
        assert_eq!(backend.rows("_spark_transactions").len(), 2);
    }

    #[tokio::test]
    async fn test_hashes_load_once() {
        let backend = Arc::new(InMemoryWorksheets::default());
        let storage = storage(backend.clone());

        storage.init().await.unwrap();
        storage.init().await.unwrap();
        storage.save(&results(Vec::new())).await.unwrap();

        assert_eq!(backend.ensure_calls(), 1);
        assert_eq!(backend.read_calls(), 1);
    }
}
