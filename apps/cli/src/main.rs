mod config;
mod main_lib;

use config::Config;
use main_lib::{build_orchestrator, init_tracing};
use sparksync_connect::RunStatus;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let orchestrator = build_orchestrator(&config)?;

    match orchestrator.run().await {
        RunStatus::Failed => std::process::exit(1),
        RunStatus::Completed(_) | RunStatus::NoStorages => Ok(()),
    }
}
