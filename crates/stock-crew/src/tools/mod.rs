//! Data tools the analysts call during their tasks
//!
//! Provider failures come back as descriptive payloads the model can read;
//! only malformed arguments are returned as `Err`.

pub mod financials;
pub mod metrics;
pub mod news;
pub mod price_history;
pub mod scrape;
pub mod sentiment;

use agent_tools::ToolRegistry;
use std::sync::Arc;

use crate::api::{MarketData, NewsSearch};
use crate::config::StockConfig;
use crate::error::Result;

pub use financials::FinancialsTool;
pub use metrics::MetricsTool;
pub use news::NewsTool;
pub use price_history::PriceHistoryTool;
pub use scrape::ScrapeTool;
pub use sentiment::SentimentTool;

pub const GET_STOCK_DATA: &str = "get_stock_data";
pub const GET_FINANCIALS: &str = "get_financials";
pub const CALCULATE_METRICS: &str = "calculate_metrics";
pub const GET_NEWS: &str = "get_news";
pub const ANALYZE_SENTIMENT: &str = "analyze_sentiment";
pub const SCRAPE_WEBSITE: &str = "scrape_website";

/// Registry holding all six tools, in a stable order
pub fn stock_tools(
    market: Arc<dyn MarketData>,
    search: Option<Arc<dyn NewsSearch>>,
    config: &StockConfig,
) -> Result<ToolRegistry> {
    Ok(ToolRegistry::new()
        .with(Arc::new(PriceHistoryTool::new(market.clone(), &config.default_period)))
        .with(Arc::new(FinancialsTool::new(market.clone())))
        .with(Arc::new(MetricsTool::new(market.clone(), &config.default_period)))
        .with(Arc::new(NewsTool::new(market, search, config.news_max_results)))
        .with(Arc::new(SentimentTool))
        .with(Arc::new(ScrapeTool::new(config.request_timeout, config.scrape_max_chars)?)))
}
