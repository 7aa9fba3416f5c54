use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Result, ValidationError};

/// Broker-declared instrument type (`SugBno`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrumentType {
    /// Foreign fund (`KranotFrgn`)
    ForeignFund,
    /// Foreign-listed stock (`ForeignStockFrgn`)
    ForeignStock,
    /// Tel Aviv listed stock (`StockShekel`)
    LocalStock,
    /// Cash/currency position (`MatachMezuman`)
    Cash,
    Unrecognized,
}

impl InstrumentType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "KranotFrgn" => Self::ForeignFund,
            "ForeignStockFrgn" => Self::ForeignStock,
            "StockShekel" => Self::LocalStock,
            "MatachMezuman" => Self::Cash,
            _ => Self::Unrecognized,
        }
    }

    pub fn is_foreign(self) -> bool {
        matches!(self, Self::ForeignFund | Self::ForeignStock)
    }
}

/// A normalized Spark holding (`RMType`).
///
/// Only the fields the pipeline reads are typed; the rest of the record is
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SparkHolding {
    #[serde(rename = "_k", default)]
    pub key: Option<String>,

    #[serde(rename = "SYMBOL_NAM")]
    pub symbol_name: String,

    #[serde(rename = "BNO_NAME", default)]
    pub security_name: Option<String>,

    /// Nominal value held (quantity)
    #[serde(rename = "NV")]
    pub quantity: Decimal,

    /// Total cost in agorot/shekels for local stocks
    #[serde(rename = "COST", default)]
    pub cost: Decimal,

    /// Total value used as the cost basis of non-local instruments
    #[serde(rename = "SUM1", default)]
    pub sum1: Decimal,

    #[serde(rename = "SUG_CUR", default)]
    pub currency_code: Option<String>,

    #[serde(rename = "SugBno", default)]
    pub instrument_code: String,
}

impl SparkHolding {
    /// Parse a normalized holding record.
    pub fn from_record(record: &Value) -> Result<Self> {
        if !record.is_object() {
            return Err(ValidationError::InvalidInput(format!(
                "holding record is not an object: {}",
                record
            ))
            .into());
        }
        Ok(serde_json::from_value(record.clone())?)
    }

    pub fn instrument_type(&self) -> InstrumentType {
        InstrumentType::from_code(&self.instrument_code)
    }

    /// Total value the cost-per-share figure is derived from.
    pub fn cost_basis_total(&self) -> Decimal {
        if self.instrument_type() == InstrumentType::LocalStock {
            self.cost
        } else {
            self.sum1
        }
    }
}

/// Category column of a holding row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldingCategory {
    #[serde(rename = "ETF")]
    Etf,
    Stocks,
    Cash,
}

impl HoldingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingCategory::Etf => "ETF",
            HoldingCategory::Stocks => "Stocks",
            HoldingCategory::Cash => "Cash",
        }
    }
}

impl std::fmt::Display for HoldingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ticker, category and currency resolved for a holding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstrument {
    pub ticker: String,
    pub category: HoldingCategory,
    pub currency: String,
}

/// Store-ready holding row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HoldingRow {
    pub ticker: String,
    pub quantity: Decimal,
    pub cost_per_share: Decimal,
    pub category: HoldingCategory,
    pub currency: String,
}

impl HoldingRow {
    /// Cells in holdings worksheet column order.
    pub fn to_sheet_row(&self) -> Vec<String> {
        vec![
            self.ticker.clone(),
            self.quantity.normalize().to_string(),
            self.cost_per_share.normalize().to_string(),
        ]
    }
}
