pub mod models;
mod orchestrator;
mod traits;

#[cfg(test)]
mod orchestrator_tests;

pub use orchestrator::{RunStatus, SyncConfig, SyncOrchestrator};
pub use traits::*;
