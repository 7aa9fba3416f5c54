//! spark-sync connect - Spark brokerage API client and the sync pipeline driver.
//!
//! [`SparkClient`] talks to the broker; [`SyncOrchestrator`] wires it to the
//! holding transformer, the stores and the notifier.

pub mod broker;
pub mod client;

pub use broker::{RunStatus, SparkApi, SparkConnector, SyncConfig, SyncOrchestrator};
pub use client::{default_api_url, SparkClient, SparkLogin, DEFAULT_TIMEOUT_MS};
