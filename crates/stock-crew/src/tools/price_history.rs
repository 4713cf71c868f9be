//! Historical daily prices

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, parse_params};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use super::GET_STOCK_DATA;
use crate::api::MarketData;
use crate::model::PriceRow;

/// Daily open/high/low/close/volume rows for a ticker
pub struct PriceHistoryTool {
    market: Arc<dyn MarketData>,
    default_period: String,
}

#[derive(Debug, Deserialize)]
struct PriceHistoryParams {
    ticker: String,
    #[serde(default)]
    period: Option<String>,
}

impl PriceHistoryTool {
    pub fn new(market: Arc<dyn MarketData>, default_period: impl Into<String>) -> Self {
        Self {
            market,
            default_period: default_period.into(),
        }
    }
}

#[async_trait]
impl Tool for PriceHistoryTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: PriceHistoryParams = parse_params(GET_STOCK_DATA, params)?;
        let period = params.period.unwrap_or_else(|| self.default_period.clone());

        match self.market.price_history(&params.ticker, &period).await {
            Ok(series) => {
                let rows: Vec<PriceRow> = series.points.iter().map(PriceRow::from).collect();
                Ok(json!({
                    "ticker": series.ticker,
                    "period": series.period,
                    "rows": rows,
                }))
            }
            Err(e) => {
                warn!(ticker = %params.ticker, error = %e, "price history unavailable");
                Ok(Value::String(format!(
                    "Error fetching historical data for {}: {e}",
                    params.ticker
                )))
            }
        }
    }

    fn name(&self) -> &str {
        GET_STOCK_DATA
    }

    fn description(&self) -> &str {
        "Fetches historical daily stock prices (open, high, low, close, volume) for a ticker \
         over a lookback period such as '3mo'. Input: ticker, period (optional, default '3mo')."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol, e.g. TATAMOTORS.NS or AAPL"),
                "period": schema::string_enum("Lookback period", &crate::api::VALID_PERIODS),
            }),
            &["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinancialStatements, PriceSeries};

    struct NoBars;

    #[async_trait]
    impl MarketData for NoBars {
        async fn price_history(&self, ticker: &str, period: &str) -> crate::Result<PriceSeries> {
            Ok(PriceSeries {
                ticker: ticker.into(),
                period: period.into(),
                points: Vec::new(),
            })
        }

        async fn financials(&self, _ticker: &str) -> crate::Result<FinancialStatements> {
            Ok(FinancialStatements::default())
        }

        async fn company_name(&self, _ticker: &str) -> crate::Result<Option<String>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_empty_history_has_no_rows() {
        let tool = PriceHistoryTool::new(Arc::new(NoBars), "3mo");
        let out = tool.execute(json!({"ticker": "DELISTED"})).await.unwrap();
        assert_eq!(out, json!({"ticker": "DELISTED", "period": "3mo", "rows": []}));
    }
}
