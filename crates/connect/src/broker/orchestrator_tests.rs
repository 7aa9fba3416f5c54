//! Tests for the sync pipeline driver.

#[cfg(test)]
mod tests {
    use crate::broker::{RunStatus, SparkApi, SparkConnector, SyncConfig, SyncOrchestrator};
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};
    use sparksync_core::accounts::Account;
    use sparksync_core::errors::{Error, Result};
    use sparksync_core::holdings::HoldingTransformer;
    use sparksync_core::notifier::{MessageRef, Notifier};
    use sparksync_core::storage::{SaveStats, Storage, StorageSet};
    use sparksync_core::ScrapeResult;
    use sparksync_market_data::{MarketDataError, MarketDataProvider, Quote, SearchResult};
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mock Spark API
    // =========================================================================

    #[derive(Default)]
    struct MockSparkApi {
        accounts: Vec<Account>,
        holdings: Vec<Value>,
        transactions: Vec<Value>,
        transaction_windows: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
        holdings_calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SparkApi for MockSparkApi {
        async fn get_accounts(&self) -> Result<Vec<Account>> {
            Ok(self.accounts.clone())
        }

        async fn get_holdings(&self, account: &Account) -> Result<Vec<Value>> {
            self.holdings_calls.lock().unwrap().push(account.key.clone());
            Ok(self.holdings.clone())
        }

        async fn get_transactions(
            &self,
            _account: &Account,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> Result<Vec<Value>> {
            self.transaction_windows.lock().unwrap().push((from, to));
            Ok(self.transactions.clone())
        }

        async fn get_account_balance(&self, _account: &Account) -> Result<Decimal> {
            Ok(dec!(10500.25))
        }
    }

    struct MockConnector {
        api: Option<Arc<MockSparkApi>>,
    }

    #[async_trait]
    impl SparkConnector for MockConnector {
        async fn connect(&self) -> Result<Arc<dyn SparkApi>> {
            match &self.api {
                Some(api) => Ok(api.clone() as Arc<dyn SparkApi>),
                None => Err(Error::Authentication("invalid credentials".to_string())),
            }
        }
    }

    // =========================================================================
    // Mock provider, notifier and storage
    // =========================================================================

    struct MockProvider;

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn get_latest_quote(&self, symbol: &str) -> std::result::Result<Quote, MarketDataError> {
            Ok(Quote::new(symbol, Utc::now(), dec!(1), "USD", "MOCK"))
        }

        async fn search(
            &self,
            query: &str,
        ) -> std::result::Result<Vec<SearchResult>, MarketDataError> {
            Ok(vec![SearchResult::new(query, query, "NMS", "ETF")])
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        edits: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }

        fn edits(&self) -> Vec<String> {
            self.edits.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Option<MessageRef> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(text.to_string());
            Some(MessageRef {
                chat_id: "chat".to_string(),
                message_id: sent.len() as i64,
            })
        }

        async fn edit_message(&self, message: Option<&MessageRef>, text: &str) {
            if message.is_some() {
                self.edits.lock().unwrap().push(text.to_string());
            }
        }
    }

    #[derive(Default)]
    struct MockStorage {
        table: Option<&'static str>,
        enabled: bool,
        fail_on_init: bool,
        fail_on_save: bool,
        saved: Mutex<Vec<ScrapeResult>>,
    }

    #[async_trait]
    impl Storage for MockStorage {
        fn name(&self) -> &str {
            "Mock"
        }

        fn table(&self) -> &str {
            self.table.unwrap_or("holdings")
        }

        fn can_save(&self) -> bool {
            self.enabled
        }

        async fn init(&self) -> Result<()> {
            if self.fail_on_init {
                return Err(Error::Storage("worksheet missing".to_string()));
            }
            Ok(())
        }

        async fn save(&self, results: &ScrapeResult) -> Result<SaveStats> {
            if self.fail_on_save {
                return Err(Error::Storage("sheet locked".to_string()));
            }
            self.saved.lock().unwrap().push(results.clone());
            let total = results.holdings().count();
            Ok(SaveStats {
                added: total,
                ..SaveStats::new("Mock", self.table(), total)
            })
        }
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    fn api() -> MockSparkApi {
        MockSparkApi {
            accounts: vec![
                Account::new("ACC_039-111111", "111111", "Main"),
                Account::new("ACC_039-222222", "222222", "Kids"),
            ],
            holdings: vec![
                json!({"_t": "RMType", "SYMBOL_NAM": "VOO US", "NV": 4, "SUM1": 1600, "SugBno": "KranotFrgn"}),
                json!({"_t": "RMType", "SYMBOL_NAM": "OLD US", "NV": 0, "SUM1": 0, "SugBno": "KranotFrgn"}),
            ],
            transactions: vec![json!({
                "_t": "StructAccountTransaction",
                "TransactionDate": "2025-02-01T10:00:00",
                "Description": "Deposit",
                "Amount": 5000
            })],
            ..Default::default()
        }
    }

    fn config(all_accounts: bool) -> SyncConfig {
        SyncConfig {
            all_accounts,
            transactions_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            company_id: "spark-meitav".to_string(),
        }
    }

    fn orchestrator(
        api: Option<Arc<MockSparkApi>>,
        storage: Arc<MockStorage>,
        notifier: Arc<RecordingNotifier>,
        all_accounts: bool,
    ) -> SyncOrchestrator {
        orchestrator_with(api, vec![storage], notifier, all_accounts)
    }

    fn orchestrator_with(
        api: Option<Arc<MockSparkApi>>,
        storages: Vec<Arc<MockStorage>>,
        notifier: Arc<RecordingNotifier>,
        all_accounts: bool,
    ) -> SyncOrchestrator {
        SyncOrchestrator::new(
            Arc::new(MockConnector { api }),
            Arc::new(HoldingTransformer::new(Arc::new(MockProvider))),
            StorageSet::new(
                storages
                    .into_iter()
                    .map(|s| s as Arc<dyn Storage>)
                    .collect(),
            ),
            notifier,
            config(all_accounts),
        )
    }

    // =========================================================================
    // Tests
    // =========================================================================

    #[tokio::test]
    async fn test_run_saves_first_account_and_edits_summary() {
        let api = Arc::new(api());
        let storage = Arc::new(MockStorage {
            enabled: true,
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let status = orchestrator(Some(api.clone()), storage.clone(), notifier.clone(), false)
            .run()
            .await;

        let RunStatus::Completed(outcome) = status else {
            panic!("expected a completed run");
        };
        assert!(outcome.saved);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.stats[0].added, 1);

        assert_eq!(*api.holdings_calls.lock().unwrap(), vec!["ACC_039-111111"]);

        let saved = storage.saved.lock().unwrap();
        let data = &saved[0].accounts[0];
        assert_eq!(data.holdings.len(), 1);
        assert_eq!(data.holdings[0].ticker, "VOO");
        assert_eq!(data.holdings[0].cost_per_share, dec!(400));
        assert_eq!(data.transactions.len(), 1);
        assert!(data.transactions[0].hash.ends_with("_Deposit__spark-meitav_111111"));
        assert_eq!(data.balance, Some(dec!(10500.25)));

        assert_eq!(notifier.sent(), vec!["Starting..."]);
        let edits = notifier.edits();
        assert_eq!(edits.len(), 1);
        assert!(edits[0].starts_with("Accounts updated:\n\t✔️ 111111: 1 holdings, 1 transactions"));
        assert!(edits[0].contains("📝 Mock (holdings)"));
    }

    #[tokio::test]
    async fn test_all_accounts_scrapes_each_account() {
        let api = Arc::new(api());
        let storage = Arc::new(MockStorage {
            enabled: true,
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());

        orchestrator(Some(api.clone()), storage.clone(), notifier, true)
            .run()
            .await;

        assert_eq!(
            *api.holdings_calls.lock().unwrap(),
            vec!["ACC_039-111111", "ACC_039-222222"]
        );
        assert_eq!(storage.saved.lock().unwrap()[0].accounts.len(), 2);
    }

    #[tokio::test]
    async fn test_transactions_window_starts_at_configured_date() {
        let api = Arc::new(api());
        let storage = Arc::new(MockStorage {
            enabled: true,
            ..Default::default()
        });

        orchestrator(Some(api.clone()), storage, Arc::new(RecordingNotifier::default()), false)
            .scrape()
            .await
            .unwrap();

        let windows = api.transaction_windows.lock().unwrap();
        assert_eq!(windows[0].0.to_rfc3339(), "2025-01-01T00:00:00+00:00");
        assert!(windows[0].1 > windows[0].0);
    }

    #[tokio::test]
    async fn test_no_storages_aborts_without_scraping() {
        let api = Arc::new(api());
        let storage = Arc::new(MockStorage::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let status = orchestrator(Some(api.clone()), storage, notifier.clone(), false)
            .run()
            .await;

        assert!(matches!(status, RunStatus::NoStorages));
        assert!(api.holdings_calls.lock().unwrap().is_empty());
        assert_eq!(notifier.edits(), vec!["No storages found, aborting"]);
    }

    #[tokio::test]
    async fn test_authentication_failure_is_reported() {
        let storage = Arc::new(MockStorage {
            enabled: true,
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let status = orchestrator(None, storage.clone(), notifier.clone(), false)
            .run()
            .await;

        assert!(matches!(status, RunStatus::Failed));
        assert!(storage.saved.lock().unwrap().is_empty());
        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[1],
            "scrape\n❌ Authentication failed: invalid credentials"
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_and_summary_still_sent() {
        let api = Arc::new(api());
        let healthy = Arc::new(MockStorage {
            enabled: true,
            ..Default::default()
        });
        let locked = Arc::new(MockStorage {
            table: Some("balances"),
            enabled: true,
            fail_on_save: true,
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let status = orchestrator_with(
            Some(api),
            vec![healthy.clone(), locked.clone()],
            notifier.clone(),
            false,
        )
        .run()
        .await;

        let RunStatus::Completed(outcome) = status else {
            panic!("expected a completed run");
        };
        assert_eq!(outcome.stats.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].store, "Mock (balances)");
        assert_eq!(healthy.saved.lock().unwrap().len(), 1);
        assert!(locked.saved.lock().unwrap().is_empty());

        assert_eq!(
            notifier.sent(),
            vec![
                "Starting...".to_string(),
                "Mock (balances)\n❌ Storage operation failed: sheet locked".to_string(),
            ]
        );
        let edits = notifier.edits();
        assert_eq!(edits.len(), 1);
        assert!(edits[0].contains("📝 Mock (holdings)"));
        assert!(!edits[0].contains("Mock (balances)"));
    }

    #[tokio::test]
    async fn test_storage_init_failure_is_reported() {
        let api = Arc::new(api());
        let storage = Arc::new(MockStorage {
            enabled: true,
            fail_on_init: true,
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let status = orchestrator(Some(api), storage.clone(), notifier.clone(), false)
            .run()
            .await;

        assert!(matches!(status, RunStatus::Failed));
        assert!(storage.saved.lock().unwrap().is_empty());
        assert!(notifier.edits().is_empty());
        assert_eq!(
            notifier.sent(),
            vec![
                "Starting...".to_string(),
                "initializeStorage\n❌ Storage operation failed: worksheet missing".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_user_without_accounts_fails() {
        let api = Arc::new(MockSparkApi::default());
        let storage = Arc::new(MockStorage {
            enabled: true,
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());

        let result = orchestrator(Some(api), storage, notifier, false).scrape().await;
        assert!(matches!(result, Err(Error::BrokerApi(_))));
    }
}
