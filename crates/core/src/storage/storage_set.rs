use std::sync::Arc;

use futures::future::join_all;
use log::{debug, error, info};

use super::stats::SaveStats;
use super::traits::Storage;
use crate::errors::{Error, Result};
use crate::scrape::ScrapeResult;

/// A store whose save call failed.
#[derive(Debug)]
pub struct StoreFailure {
    pub store: String,
    pub error: Error,
}

/// Outcome of writing one scrape result to every active store.
#[derive(Debug, Default)]
pub struct SaveOutcome {
    /// False when there was nothing to write.
    pub saved: bool,
    pub stats: Vec<SaveStats>,
    pub failures: Vec<StoreFailure>,
}

/// The stores taking part in a run. Stores that cannot save are dropped at
/// construction and never touched again.
pub struct StorageSet {
    storages: Vec<Arc<dyn Storage>>,
}

impl StorageSet {
    pub fn new(candidates: Vec<Arc<dyn Storage>>) -> Self {
        let storages = candidates
            .into_iter()
            .filter(|s| {
                let active = s.can_save();
                if !active {
                    debug!("Storage {} ({}) is not configured, skipping", s.name(), s.table());
                }
                active
            })
            .collect();
        Self { storages }
    }

    pub fn is_empty(&self) -> bool {
        self.storages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.storages.len()
    }

    /// Initialize every active store concurrently.
    pub async fn initialize_all(&self) -> Result<()> {
        let results = join_all(self.storages.iter().map(|s| s.init())).await;
        for (storage, result) in self.storages.iter().zip(results) {
            if let Err(e) = result {
                error!("Failed to initialize storage {}: {}", storage.table(), e);
                return Err(e);
            }
        }
        info!("{} storage(s) initialized", self.storages.len());
        Ok(())
    }

    /// Save to every active store concurrently. A failing store does not
    /// prevent the others from writing.
    pub async fn save_results(&self, results: &ScrapeResult) -> SaveOutcome {
        if results.is_empty() {
            info!("Nothing to save");
            return SaveOutcome::default();
        }

        let outcomes = join_all(self.storages.iter().map(|s| s.save(results))).await;

        let mut outcome = SaveOutcome {
            saved: true,
            ..Default::default()
        };
        for (storage, result) in self.storages.iter().zip(outcomes) {
            match result {
                Ok(stats) => {
                    info!(
                        "Saved to {} ({}): {} added, {} skipped",
                        stats.name, stats.table, stats.added, stats.skipped
                    );
                    outcome.stats.push(stats);
                }
                Err(e) => {
                    error!("Failed to save to {} ({}): {}", storage.name(), storage.table(), e);
                    outcome.failures.push(StoreFailure {
                        store: format!("{} ({})", storage.name(), storage.table()),
                        error: e,
                    });
                }
            }
        }
        outcome
    }
}
