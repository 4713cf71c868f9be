//! Yahoo Finance client
//!
//! Daily bars come from the chart API through `yahoo_finance_api`; annual
//! statements and issuer names come from the fundamentals-timeseries and
//! search endpoints, read directly over HTTP.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use yahoo_finance_api as yahoo;

use super::{MarketData, VALID_PERIODS};
use crate::config::YAHOO_BASE_URL;
use crate::error::{Result, StockError};
use crate::model::{FinancialStatements, PricePoint, PriceSeries, StatementTable};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Years of annual statements requested
const STATEMENT_YEARS: i64 = 5;

const INCOME_ITEMS: [&str; 8] = [
    "TotalRevenue",
    "CostOfRevenue",
    "GrossProfit",
    "OperatingExpense",
    "OperatingIncome",
    "NetIncome",
    "EBITDA",
    "DilutedEPS",
];

const BALANCE_ITEMS: [&str; 7] = [
    "TotalAssets",
    "TotalLiabilitiesNetMinorityInterest",
    "StockholdersEquity",
    "CashAndCashEquivalents",
    "TotalDebt",
    "CurrentAssets",
    "CurrentLiabilities",
];

const CASH_FLOW_ITEMS: [&str; 5] = [
    "OperatingCashFlow",
    "InvestingCashFlow",
    "FinancingCashFlow",
    "FreeCashFlow",
    "CapitalExpenditure",
];

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(YAHOO_BASE_URL, timeout)
    }

    /// Client against a different host for the statement and search endpoints
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| StockError::ApiError(format!("Yahoo request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::ApiError(format!("Yahoo API error {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| StockError::ApiError(format!("Failed to parse Yahoo response: {e}")))
    }
}

#[async_trait]
impl MarketData for YahooFinanceClient {
    async fn price_history(&self, ticker: &str, period: &str) -> Result<PriceSeries> {
        if !VALID_PERIODS.contains(&period) {
            return Err(StockError::InvalidPeriod(period.to_string()));
        }

        let provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;
        let response = provider
            .get_quote_range(ticker, "1d", period)
            .await
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;
        let quotes = response
            .quotes()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let points: Vec<PricePoint> = quotes
            .iter()
            .filter_map(|q| {
                let timestamp = i64::try_from(q.timestamp)
                    .ok()
                    .and_then(|t| DateTime::from_timestamp(t, 0))?;
                Some(PricePoint {
                    timestamp,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect();

        // Empty series pass through; metrics reports them as insufficient data
        debug!(ticker, period, rows = points.len(), "fetched price history");
        Ok(PriceSeries {
            ticker: ticker.to_string(),
            period: period.to_string(),
            points,
        })
    }

    async fn financials(&self, ticker: &str) -> Result<FinancialStatements> {
        let types = INCOME_ITEMS
            .iter()
            .chain(&BALANCE_ITEMS)
            .chain(&CASH_FLOW_ITEMS)
            .map(|item| format!("annual{item}"))
            .collect::<Vec<_>>()
            .join(",");
        let now = Utc::now().timestamp();
        let start = now - STATEMENT_YEARS * 366 * 24 * 3600;

        let url = format!(
            "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{ticker}",
            self.base_url
        );
        let body = self
            .get_json(
                &url,
                &[
                    ("symbol", ticker.to_string()),
                    ("type", types),
                    ("period1", start.to_string()),
                    ("period2", now.to_string()),
                ],
            )
            .await?;

        let statements = parse_timeseries(&body)?;
        if statements.is_empty() {
            return Err(StockError::DataUnavailable {
                ticker: ticker.to_string(),
                reason: "no financial statements reported".to_string(),
            });
        }
        Ok(statements)
    }

    async fn company_name(&self, ticker: &str) -> Result<Option<String>> {
        let url = format!("{}/v1/finance/search", self.base_url);
        let body = self
            .get_json(
                &url,
                &[
                    ("q", ticker.to_string()),
                    ("quotesCount", "5".to_string()),
                    ("newsCount", "0".to_string()),
                ],
            )
            .await?;

        let search: SearchResponse = serde_json::from_value(body)?;
        let quote = search
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(ticker))
            .or_else(|| search.quotes.first());

        Ok(quote.and_then(|q| q.longname.clone().or_else(|| q.shortname.clone())))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    #[serde(default)]
    symbol: String,
    shortname: Option<String>,
    longname: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeseriesEntry {
    as_of_date: String,
    reported_value: ReportedValue,
}

#[derive(Debug, Deserialize)]
struct ReportedValue {
    raw: f64,
}

/// Split a fundamentals-timeseries payload into the three statements
///
/// Each result carries one series named in `meta.type[0]` (e.g.
/// `annualTotalRevenue`); null entries mark periods without a value.
fn parse_timeseries(body: &Value) -> Result<FinancialStatements> {
    let results = body
        .pointer("/timeseries/result")
        .and_then(Value::as_array)
        .ok_or_else(|| StockError::ApiError("timeseries payload has no result".to_string()))?;

    let mut statements = FinancialStatements::default();
    for result in results {
        let Some(series) = result.pointer("/meta/type/0").and_then(Value::as_str) else {
            continue;
        };
        let item = series.strip_prefix("annual").unwrap_or(series);
        let table = if INCOME_ITEMS.contains(&item) {
            &mut statements.income_statement
        } else if BALANCE_ITEMS.contains(&item) {
            &mut statements.balance_sheet
        } else if CASH_FLOW_ITEMS.contains(&item) {
            &mut statements.cash_flow
        } else {
            continue;
        };

        let entries = result.get(series).and_then(Value::as_array).into_iter().flatten();
        for entry in entries.filter(|e| !e.is_null()) {
            let entry: TimeseriesEntry = serde_json::from_value(entry.clone())?;
            insert(table, entry.as_of_date, item, entry.reported_value.raw);
        }
    }
    Ok(statements)
}

fn insert(table: &mut StatementTable, period: String, item: &str, value: f64) {
    table.entry(period).or_default().insert(item.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_timeseries() {
        let body = json!({
            "timeseries": {
                "result": [
                    {
                        "meta": {"symbol": ["TATAMOTORS.NS"], "type": ["annualTotalRevenue"]},
                        "annualTotalRevenue": [
                            null,
                            {"asOfDate": "2024-03-31", "reportedValue": {"raw": 4.3e12, "fmt": "4.3T"}}
                        ]
                    },
                    {
                        "meta": {"type": ["annualTotalDebt"]},
                        "annualTotalDebt": [
                            {"asOfDate": "2024-03-31", "reportedValue": {"raw": 1.1e12}}
                        ]
                    },
                    {
                        "meta": {"type": ["annualFreeCashFlow"]}
                    },
                    {
                        "meta": {"type": ["annualSomethingElse"]},
                        "annualSomethingElse": [{"asOfDate": "2024-03-31", "reportedValue": {"raw": 1.0}}]
                    }
                ],
                "error": null
            }
        });

        let statements = parse_timeseries(&body).unwrap();
        assert_eq!(statements.income_statement["2024-03-31"]["TotalRevenue"], 4.3e12);
        assert_eq!(statements.balance_sheet["2024-03-31"]["TotalDebt"], 1.1e12);
        assert!(statements.cash_flow.is_empty());
    }

    #[test]
    fn test_parse_timeseries_rejects_unknown_shape() {
        assert!(parse_timeseries(&json!({"finance": {"error": "Not Found"}})).is_err());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_price_history() {
        let client = YahooFinanceClient::new(Duration::from_secs(30)).unwrap();
        let series = client.price_history("AAPL", "1mo").await.unwrap();
        assert!(!series.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_period_is_rejected_locally() {
        let client = YahooFinanceClient::new(Duration::from_secs(1)).unwrap();
        let err = client.price_history("AAPL", "7w").await.unwrap_err();
        assert!(matches!(err, StockError::InvalidPeriod(_)));
    }
}
