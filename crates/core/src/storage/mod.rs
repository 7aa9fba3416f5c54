//! Storage module - store traits, save bookkeeping and the active store set.

mod bookkeeper;
mod stats;
mod storage_set;
mod traits;

pub use bookkeeper::{plan_holdings_save, plan_transactions_save, SavePlan};
pub use stats::SaveStats;
pub use storage_set::{SaveOutcome, StorageSet, StoreFailure};
pub use traits::{Storage, WorksheetBackend, WorksheetRow};
