//! Holdings module - broker holding models, ticker resolution and the
//! holding-to-row transformer.

mod holdings_model;
mod resolver;
mod skip_reason;
mod ticker;
mod transformer;


pub use holdings_model::{
    HoldingCategory, HoldingRow, InstrumentType, ResolvedInstrument, SparkHolding,
};
pub use resolver::{category_for_quote_type, TickerResolver};
pub use skip_reason::SkipReason;
pub use ticker::{strip_first, yahoo_to_local_ticker};
pub use transformer::{cost_per_share, HoldingTransformer, TransformReport};
