use std::error::Error as StdError;

use crate::scrape::ScrapeResult;
use crate::storage::SaveStats;

/// One store block of the summary message.
pub fn stats_line(stats: &SaveStats) -> String {
    format!(
        "📝 {} ({})\n    {} added, {} skipped\n    ({} existing, {} pending)",
        stats.name, stats.table, stats.added, stats.skipped, stats.existing, stats.pending
    )
}

/// Human readable run summary sent when the run succeeds.
pub fn summary_message(results: &ScrapeResult, stats: &[SaveStats]) -> String {
    let accounts: Vec<String> = results
        .accounts
        .iter()
        .map(|data| {
            let balance = data
                .balance
                .map(|b| format!(", balance {}", b.normalize()))
                .unwrap_or_default();
            format!(
                "\t✔️ {}: {} holdings, {} transactions{}",
                data.account.number,
                data.holdings.len(),
                data.transactions.len(),
                balance
            )
        })
        .collect();

    let saved: Vec<String> = stats.iter().map(stats_line).collect();

    let or_none = |lines: Vec<String>| {
        if lines.is_empty() {
            "\t😶 None".to_string()
        } else {
            lines.join("\n")
        }
    };

    format!(
        "Accounts updated:\n{}\nSaved to:\n{}",
        or_none(accounts),
        or_none(saved)
    )
}

/// Error report text: caller, message, then the source chain.
pub fn error_message(caller: &str, error: &(dyn StdError + Send + Sync)) -> String {
    let mut text = format!("{}\n❌ {}", caller, error);
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    text.trim().to_string()
}
