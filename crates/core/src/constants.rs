/// Header row of the holdings worksheet
pub const HOLDINGS_HEADERS: [&str; 3] = ["ticker", "quantity", "cost per share"];

/// Header row of the transactions worksheet
pub const TRANSACTIONS_HEADERS: [&str; 11] = [
    "date",
    "amount",
    "description",
    "memo",
    "category",
    "account",
    "hash",
    "comment",
    "scraped at",
    "scraped by",
    "identifier",
];

/// Column of the transactions worksheet holding the idempotency hash
pub const HASH_COLUMN: &str = "hash";

/// Default worksheet titles
pub const DEFAULT_HOLDINGS_WORKSHEET: &str = "_spark_holdings";
pub const DEFAULT_TRANSACTIONS_WORKSHEET: &str = "_spark_transactions";

/// Suffix the broker appends to foreign listings ("AAPL US")
pub const FOREIGN_SYMBOL_SUFFIX: &str = " US";

/// Suffix the broker appends to cash positions ("USD CASH")
pub const CASH_SYMBOL_SUFFIX: &str = " CASH";

/// Yahoo suffix of Tel Aviv listings
pub const LOCAL_EXCHANGE_SUFFIX: &str = ".TA";

/// Exchange prefix of local tickers in the sheet ("TLV:")
pub const LOCAL_EXCHANGE_PREFIX: &str = "TLV:";

/// Position of the re-inserted separator in local tickers
pub const LOCAL_TICKER_SEPARATOR_POSITION: usize = 6;

/// Currency of local-market stocks
pub const LOCAL_CURRENCY: &str = "ILS";

/// Holdings below this quantity are not written to the store
pub const MIN_SAVED_QUANTITY: i64 = 1;

/// Decimal places of the cost-per-share column
pub const COST_PER_SHARE_DECIMALS: u32 = 2;
