//! Recent news search for a ticker

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, parse_params};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use super::GET_NEWS;
use crate::api::{MarketData, NewsSearch};
use crate::error::{Result, StockError};
use crate::model::{NewsItem, SearchHit};

/// Searches recent news about the issuer and returns `NewsItem` records
pub struct NewsTool {
    market: Arc<dyn MarketData>,
    search: Option<Arc<dyn NewsSearch>>,
    default_max_results: usize,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    ticker: String,
    #[serde(default)]
    max_results: Option<usize>,
}

/// Search query for an issuer
pub fn news_query(company_name: &str, ticker: &str) -> String {
    format!("{company_name} {ticker} stock news financial earnings")
}

/// Host of `url` without a leading `www.`, or `Unknown`
pub fn source_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Shape a search hit for the sentiment tool
pub fn format_hit(hit: SearchHit) -> NewsItem {
    let body = Some(hit.content)
        .filter(|c| !c.trim().is_empty())
        .or(hit.raw_content.filter(|c| !c.trim().is_empty()))
        .unwrap_or_else(|| "No content".to_string());
    let date = hit
        .published_date
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
    let title = if hit.title.trim().is_empty() {
        "No title".to_string()
    } else {
        hit.title
    };

    NewsItem {
        title,
        body,
        date,
        source: source_from_url(&hit.url),
        url: hit.url,
    }
}

impl NewsTool {
    pub fn new(
        market: Arc<dyn MarketData>,
        search: Option<Arc<dyn NewsSearch>>,
        default_max_results: usize,
    ) -> Self {
        Self {
            market,
            search,
            default_max_results,
        }
    }

    async fn fetch_news(&self, ticker: &str, max_results: usize) -> Result<Vec<NewsItem>> {
        let search = self.search.as_ref().ok_or_else(|| {
            StockError::ConfigError("no news search backend configured".to_string())
        })?;

        // The issuer name only sharpens the query
        let company = match self.market.company_name(ticker).await {
            Ok(Some(name)) => name,
            Ok(None) => ticker.to_string(),
            Err(e) => {
                debug!(ticker, error = %e, "company name lookup failed");
                ticker.to_string()
            }
        };

        let query = news_query(&company, ticker);
        let hits = search.search(&query, max_results).await?;
        debug!(provider = search.provider(), %query, hits = hits.len(), "news search");

        Ok(hits.into_iter().map(format_hit).collect())
    }
}

#[async_trait]
impl Tool for NewsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: NewsParams = parse_params(GET_NEWS, params)?;
        let max_results = params.max_results.unwrap_or(self.default_max_results).max(1);

        match self.fetch_news(&params.ticker, max_results).await {
            Ok(news) => Ok(json!({ "news": news })),
            Err(e) => {
                warn!(ticker = %params.ticker, error = %e, "news search failed");
                Ok(json!({
                    "error": format!("Error searching news for {}: {e}", params.ticker),
                    "news": [],
                }))
            }
        }
    }

    fn name(&self) -> &str {
        GET_NEWS
    }

    fn description(&self) -> &str {
        "Searches recent news about a company by ticker. Returns a list of articles with \
         title, body, date, source and url that can be passed to analyze_sentiment."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("Stock ticker symbol"),
                "max_results": schema::integer("Maximum number of articles (default 5)"),
            }),
            &["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_url() {
        assert_eq!(source_from_url("https://www.reuters.com/markets/x"), "reuters.com");
        assert_eq!(source_from_url("https://economictimes.indiatimes.com/a"), "economictimes.indiatimes.com");
        assert_eq!(source_from_url(""), "Unknown");
        assert_eq!(source_from_url("not a url"), "Unknown");
    }

    #[test]
    fn test_format_hit_fallbacks() {
        let item = format_hit(SearchHit {
            title: String::new(),
            url: "https://www.livemint.com/news".into(),
            content: String::new(),
            raw_content: Some("raw text".into()),
            published_date: Some("2024-05-10".into()),
        });
        assert_eq!(item.title, "No title");
        assert_eq!(item.body, "raw text");
        assert_eq!(item.date, "2024-05-10");
        assert_eq!(item.source, "livemint.com");

        let bare = format_hit(SearchHit::default());
        assert_eq!(bare.body, "No content");
        assert_eq!(bare.source, "Unknown");
        assert_eq!(bare.date.len(), 10);
    }

    #[test]
    fn test_news_query() {
        assert_eq!(
            news_query("Tata Motors Limited", "TATAMOTORS.NS"),
            "Tata Motors Limited TATAMOTORS.NS stock news financial earnings"
        );
    }
}
