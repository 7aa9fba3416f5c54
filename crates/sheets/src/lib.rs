//! Google Sheets storage for spark-sync.
//!
//! Two stores share one spreadsheet: holdings are appended to the holdings
//! worksheet as-is, transactions are deduplicated against the hash column of
//! the transactions worksheet before being appended.

mod auth;
mod client;
mod errors;
mod holdings;
mod transactions;

#[cfg(test)]
mod test_support;

pub use auth::{decode_private_key, ServiceAccountAuth, ServiceAccountCredentials};
pub use client::{GoogleSheetsClient, DEFAULT_SHEETS_API_URL};
pub use errors::SheetsError;
pub use holdings::HoldingsSheetsStorage;
pub use transactions::TransactionsSheetsStorage;

/// Display name of both worksheet stores.
pub const STORAGE_NAME: &str = "Google Sheets";
