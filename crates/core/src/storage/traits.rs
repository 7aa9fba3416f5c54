use std::collections::HashMap;

use async_trait::async_trait;

use super::stats::SaveStats;
use crate::errors::Result;
use crate::scrape::ScrapeResult;

/// A worksheet row read back from the store, keyed by header name.
pub type WorksheetRow = HashMap<String, String>;

/// A destination for scraped rows.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Display name used in summaries ("Google Sheets").
    fn name(&self) -> &str;

    /// Table/worksheet the store writes to.
    fn table(&self) -> &str;

    /// Whether this store is configured to participate in the run.
    fn can_save(&self) -> bool;

    /// Prepare the store. Must be idempotent; repeated calls after the first
    /// successful one are no-ops.
    async fn init(&self) -> Result<()>;

    /// Write the rows of `results` this store is responsible for.
    async fn save(&self, results: &ScrapeResult) -> Result<SaveStats>;
}

/// Spreadsheet mechanics behind the worksheet-backed stores.
#[async_trait]
pub trait WorksheetBackend: Send + Sync {
    /// Create the worksheet with its header row unless it already exists.
    async fn ensure_worksheet(&self, title: &str, headers: &[&str]) -> Result<()>;

    /// Read all data rows (header excluded).
    async fn get_rows(&self, title: &str) -> Result<Vec<WorksheetRow>>;

    /// Append rows after the last data row.
    async fn add_rows(&self, title: &str, rows: Vec<Vec<String>>) -> Result<()>;
}
