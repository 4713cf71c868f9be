//! Return and volatility metrics

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, parse_params};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use super::CALCULATE_METRICS;
use crate::api::MarketData;
use crate::model::{PriceRow, PriceSeries, ReturnMetrics};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;
const SAMPLE_ROWS: usize = 5;

/// Fewer than two closes: no return can be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientData;

/// Simple percentage change between consecutive closes
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// `(1 + cumulative)^(252 / n) - 1`, or 0 when there are no daily returns
pub fn annualized_return(cumulative_return: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let years = TRADING_DAYS_PER_YEAR / n as f64;
    (1.0 + cumulative_return).powf(years) - 1.0
}

/// Standard deviation with an n-1 denominator
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Metrics over a whole series
pub fn compute_metrics(series: &PriceSeries) -> Result<ReturnMetrics, InsufficientData> {
    let closes = series.closes();
    let (Some(first), Some(last)) = (closes.first(), closes.last()) else {
        return Err(InsufficientData);
    };
    if closes.len() < 2 {
        return Err(InsufficientData);
    }

    let returns = daily_returns(&closes);
    let cumulative_return = last / first - 1.0;
    let daily_volatility = sample_std(&returns);

    Ok(ReturnMetrics {
        cumulative_return,
        annualized_return: annualized_return(cumulative_return, returns.len()),
        daily_volatility,
        annualized_volatility: daily_volatility.map(|v| v * TRADING_DAYS_PER_YEAR.sqrt()),
        price_data_sample: series.points.iter().take(SAMPLE_ROWS).map(PriceRow::from).collect(),
    })
}

/// Cumulative/annualized return and volatility for a ticker
pub struct MetricsTool {
    market: Arc<dyn MarketData>,
    default_period: String,
}

#[derive(Debug, Deserialize)]
struct MetricsParams {
    ticker: String,
    #[serde(default)]
    period: Option<String>,
}

impl MetricsTool {
    pub fn new(market: Arc<dyn MarketData>, default_period: impl Into<String>) -> Self {
        Self {
            market,
            default_period: default_period.into(),
        }
    }
}

#[async_trait]
impl Tool for MetricsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: MetricsParams = parse_params(CALCULATE_METRICS, params)?;
        let period = params.period.unwrap_or_else(|| self.default_period.clone());

        let series = match self.market.price_history(&params.ticker, &period).await {
            Ok(series) => series,
            Err(e) => {
                warn!(ticker = %params.ticker, error = %e, "metrics input unavailable");
                return Ok(Value::String(format!(
                    "Error calculating metrics for {}: {e}",
                    params.ticker
                )));
            }
        };

        match compute_metrics(&series) {
            Ok(metrics) => Ok(serde_json::to_value(metrics)?),
            Err(InsufficientData) => Ok(json!({ "error": "Insufficient data" })),
        }
    }

    fn name(&self) -> &str {
        CALCULATE_METRICS
    }

    fn description(&self) -> &str {
        "Calculates cumulative return, annualized return (252 trading days) and daily and \
         annualized volatility for a ticker over a period such as '3mo'. Input: ticker, \
         period (optional, default '3mo')."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol"),
                "period": schema::string_enum("Lookback period", &crate::api::VALID_PERIODS),
            }),
            &["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricePoint;
    use chrono::{DateTime, Duration};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = DateTime::from_timestamp(1_704_153_600, 0).unwrap();
        PriceSeries {
            ticker: "TATAMOTORS.NS".into(),
            period: "3mo".into(),
            points: closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PricePoint {
                    timestamp: start + Duration::days(i64::try_from(i).unwrap()),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 1_000,
                })
                .collect(),
        }
    }

    #[test]
    fn test_cumulative_return_is_exact() {
        let metrics = compute_metrics(&series(&[100.0, 120.0, 90.0, 110.0])).unwrap();
        assert!((metrics.cumulative_return - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_annualized_return() {
        assert_eq!(annualized_return(0.5, 0), 0.0);
        let expected = 1.1_f64.powf(252.0 / 3.0) - 1.0;
        assert!((annualized_return(0.1, 3) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_sample_std() {
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(sample_std(&[0.01]).is_none());
    }

    #[test]
    fn test_volatility_is_annualized() {
        let metrics = compute_metrics(&series(&[100.0, 110.0, 99.0, 104.0])).unwrap();
        let daily = metrics.daily_volatility.unwrap();
        let expected = sample_std(&daily_returns(&[100.0, 110.0, 99.0, 104.0])).unwrap();
        assert!((daily - expected).abs() < 1e-12);
        assert!((metrics.annualized_volatility.unwrap() - daily * 252f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_two_closes_leave_volatility_undefined() {
        let metrics = compute_metrics(&series(&[100.0, 105.0])).unwrap();
        assert!(metrics.daily_volatility.is_none());
        assert!(metrics.annualized_volatility.is_none());
        assert!(metrics.annualized_return > metrics.cumulative_return);
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(compute_metrics(&series(&[])), Err(InsufficientData));
        assert_eq!(compute_metrics(&series(&[100.0])), Err(InsufficientData));
    }

    /// Market whose history for any ticker is the given closes
    struct FixedCloses(Vec<f64>);

    #[async_trait]
    impl MarketData for FixedCloses {
        async fn price_history(&self, _ticker: &str, _period: &str) -> crate::Result<PriceSeries> {
            Ok(series(&self.0))
        }

        async fn financials(&self, _ticker: &str) -> crate::Result<crate::model::FinancialStatements> {
            Ok(crate::model::FinancialStatements::default())
        }

        async fn company_name(&self, _ticker: &str) -> crate::Result<Option<String>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_tool_reports_insufficient_data() {
        for closes in [vec![], vec![100.0]] {
            let tool = MetricsTool::new(Arc::new(FixedCloses(closes)), "3mo");
            let out = tool.execute(json!({"ticker": "TATAMOTORS.NS"})).await.unwrap();
            assert_eq!(out, json!({ "error": "Insufficient data" }));
        }
    }

    #[tokio::test]
    async fn test_tool_returns_metrics() {
        let tool = MetricsTool::new(Arc::new(FixedCloses(vec![100.0, 110.0])), "3mo");
        let out = tool.execute(json!({"ticker": "INFY", "period": "1mo"})).await.unwrap();
        assert!((out["cumulative_return"].as_f64().unwrap() - 0.1).abs() < 1e-12);
        assert_eq!(out["price_data_sample"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_sample_is_first_five_rows() {
        let metrics = compute_metrics(&series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])).unwrap();
        assert_eq!(metrics.price_data_sample.len(), 5);
        assert_eq!(metrics.price_data_sample[0].date, "2024-01-02");
        assert_eq!(metrics.price_data_sample[4].close, 5.0);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(compute_metrics(&series(&[100.0, 105.0])).unwrap()).unwrap();
        for key in [
            "cumulative_return",
            "annualized_return",
            "daily_volatility",
            "annualized_volatility",
            "price_data_sample",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value["daily_volatility"].is_null());
    }
}
