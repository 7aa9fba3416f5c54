use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use tokio::sync::OnceCell;

use sparksync_core::constants::HOLDINGS_HEADERS;
use sparksync_core::errors::Result;
use sparksync_core::holdings::HoldingRow;
use sparksync_core::storage::{plan_holdings_save, SaveStats, Storage, WorksheetBackend};
use sparksync_core::ScrapeResult;

use crate::STORAGE_NAME;

/// Appends holding rows to the holdings worksheet.
pub struct HoldingsSheetsStorage {
    backend: Arc<dyn WorksheetBackend>,
    worksheet: String,
    enabled: bool,
    initialized: OnceCell<()>,
}

impl HoldingsSheetsStorage {
    pub fn new(backend: Arc<dyn WorksheetBackend>, worksheet: impl Into<String>, enabled: bool) -> Self {
        Self {
            backend,
            worksheet: worksheet.into(),
            enabled,
            initialized: OnceCell::new(),
        }
    }
}

#[async_trait]
impl Storage for HoldingsSheetsStorage {
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
        self.initialized
            .get_or_try_init(|| async {
                self.backend
                    .ensure_worksheet(&self.worksheet, &HOLDINGS_HEADERS)
                    .await
            })
            .await?;
        Ok(())
    }

    async fn save(&self, results: &ScrapeResult) -> Result<SaveStats> {
        self.init().await?;

        let holdings: Vec<HoldingRow> = results.holdings().cloned().collect();
        let plan = plan_holdings_save(STORAGE_NAME, &self.worksheet, &holdings);

        if !plan.rows.is_empty() {
            let rows = plan.rows.iter().map(HoldingRow::to_sheet_row).collect();
            self.backend.add_rows(&self.worksheet, rows).await?;
        }
        debug!(
            "{} holdings written to {} ({} pending)",
            plan.stats.added, self.worksheet, plan.stats.pending
        );

        Ok(plan.stats)
    }
}
