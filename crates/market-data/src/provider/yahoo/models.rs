//! Yahoo Finance API response models.
//!
//! `quoteSummary` (price module) is the primary latest-quote source because it
//! reports the trading currency; the v8 chart `meta` block is the fallback.

use serde::Deserialize;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Vec<YahooQuoteSummaryResult>,
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
}

/// Price data from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub currency: Option<String>,
    pub quote_type: Option<String>,
    pub regular_market_price: Option<YahooPriceDetail>,
    pub regular_market_time: Option<i64>,
}

/// Price detail with raw and formatted values
#[derive(Debug, Deserialize, Clone)]
pub struct YahooPriceDetail {
    pub raw: Option<f64>,
}

/// v8 chart endpoint response
#[derive(Debug, Deserialize)]
pub struct YahooChartResponse {
    pub chart: YahooChart,
}

#[derive(Debug, Deserialize)]
pub struct YahooChart {
    pub result: Option<Vec<YahooChartResult>>,
}

#[derive(Debug, Deserialize)]
pub struct YahooChartResult {
    pub meta: YahooChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_time: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_price_detail() {
        let json = r#"{"raw": 150.25, "fmt": "150.25"}"#;
        let detail: YahooPriceDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.raw, Some(150.25));
    }

    #[test]
    fn test_deserialize_price_detail_empty_object() {
        let detail: YahooPriceDetail = serde_json::from_str("{}").unwrap();
        assert_eq!(detail.raw, None);
    }

    #[test]
    fn test_deserialize_quote_summary_price() {
        let json = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "currency": "USD",
                        "quoteType": "ETF",
                        "regularMarketPrice": {"raw": 432.1, "fmt": "432.10"},
                        "regularMarketTime": 1700000000
                    }
                }],
                "error": null
            }
        }"#;
        let response: YahooQuoteSummaryResponse = serde_json::from_str(json).unwrap();
        let price = response.quote_summary.result[0].price.as_ref().unwrap();
        assert_eq!(price.currency.as_deref(), Some("USD"));
        assert_eq!(price.quote_type.as_deref(), Some("ETF"));
        assert_eq!(
            price.regular_market_price.as_ref().and_then(|p| p.raw),
            Some(432.1)
        );
    }

    #[test]
    fn test_deserialize_chart_meta() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": {
                        "symbol": "TEVA.TA",
                        "currency": "ILA",
                        "regularMarketPrice": 5120.0,
                        "regularMarketTime": 1700000000
                    },
                    "timestamp": [1700000000]
                }],
                "error": null
            }
        }"#;
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        let result = response.chart.result.unwrap();
        assert_eq!(result[0].meta.currency.as_deref(), Some("ILA"));
        assert_eq!(result[0].meta.regular_market_price, Some(5120.0));
    }

    #[test]
    fn test_deserialize_chart_not_found() {
        let json = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        assert!(response.chart.result.is_none());
    }
}
