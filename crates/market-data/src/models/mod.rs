//! Market data models
//!
//! - `quote` - Latest quote data (Quote)
//! - `search` - Search result data (SearchResult, QuoteType)

mod quote;
mod search;

pub use quote::Quote;
pub use search::{QuoteType, SearchResult};
