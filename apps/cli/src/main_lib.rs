use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use sparksync_connect::{SparkLogin, SyncConfig, SyncOrchestrator};
use sparksync_core::holdings::HoldingTransformer;
use sparksync_core::notifier::Notifier;
use sparksync_core::storage::{Storage, StorageSet, WorksheetBackend};
use sparksync_core::transactions::company_id;
use sparksync_market_data::YahooProvider;
use sparksync_notify::{NoopNotifier, TelegramNotifier};
use sparksync_sheets::{
    GoogleSheetsClient, HoldingsSheetsStorage, ServiceAccountAuth, TransactionsSheetsStorage,
};

use crate::config::Config;

/// Install the global subscriber. `RUST_LOG` wins; otherwise `VERBOSE=true`
/// selects debug output.
pub fn init_tracing() {
    let log_format = std::env::var("SPARKSYNC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let verbose = std::env::var("VERBOSE")
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

fn build_storages(config: &Config) -> anyhow::Result<StorageSet> {
    let Some(sheets) = &config.sheets else {
        tracing::warn!("GOOGLE_SHEET_ID is not set");
        return Ok(StorageSet::new(Vec::new()));
    };

    let enabled = sheets.credentials.is_some();
    let auth = sheets
        .credentials
        .clone()
        .map(ServiceAccountAuth::new)
        .transpose()?;
    let backend: Arc<dyn WorksheetBackend> =
        Arc::new(GoogleSheetsClient::new(sheets.sheet_id.clone(), auth)?);

    let scraped_at = Utc::now().format("%Y-%m-%d").to_string();
    let storages: Vec<Arc<dyn Storage>> = vec![
        Arc::new(HoldingsSheetsStorage::new(
            backend.clone(),
            sheets.holdings_worksheet.clone(),
            enabled,
        )),
        Arc::new(TransactionsSheetsStorage::new(
            backend,
            sheets.transactions_worksheet.clone(),
            enabled,
            scraped_at,
            config.system_name.clone(),
        )),
    ];
    Ok(StorageSet::new(storages))
}

fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn Notifier>> {
    Ok(match &config.telegram {
        Some(telegram) => Arc::new(TelegramNotifier::new(
            telegram.api_key.clone(),
            telegram.chat_id.clone(),
        )?),
        None => {
            tracing::info!("Telegram is not configured, notifications are logged only");
            Arc::new(NoopNotifier)
        }
    })
}

/// Wire the Spark client, Yahoo lookups, the sheets stores and the notifier
/// into a pipeline driver.
pub fn build_orchestrator(config: &Config) -> anyhow::Result<SyncOrchestrator> {
    let spark = &config.spark;
    let connector = Arc::new(SparkLogin {
        base_url: spark.api_url.clone(),
        username: spark.username.clone(),
        password: spark.password.clone(),
        timeout: spark.request_timeout,
    });
    let transformer = Arc::new(HoldingTransformer::new(Arc::new(YahooProvider::new()?)));

    Ok(SyncOrchestrator::new(
        connector,
        transformer,
        build_storages(config)?,
        build_notifier(config)?,
        SyncConfig {
            all_accounts: spark.all_accounts,
            transactions_start: spark.transactions_start,
            company_id: company_id(&spark.broker),
        },
    ))
}
