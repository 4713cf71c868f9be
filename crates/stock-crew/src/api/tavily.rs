//! Tavily search API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{NewsSearch, SharedRateLimiter, per_minute};
use crate::config::TAVILY_BASE_URL;
use crate::error::{Result, StockError};
use crate::model::SearchHit;

/// Tavily news search, rate limited per minute
pub struct TavilyClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: usize,
    topic: &'static str,
    search_depth: &'static str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
    raw_content: Option<String>,
    published_date: Option<String>,
}

impl From<TavilyResult> for SearchHit {
    fn from(r: TavilyResult) -> Self {
        Self {
            title: r.title,
            url: r.url,
            content: r.content,
            raw_content: r.raw_content,
            published_date: r.published_date,
        }
    }
}

impl TavilyClient {
    /// # Arguments
    /// * `api_key` - Tavily API key
    /// * `rate_limit` - Requests per minute
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, TAVILY_BASE_URL, rate_limit, timeout)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        rate_limit: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(StockError::ConfigError("Tavily API key is empty".to_string()));
        }

        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter: per_minute(rate_limit),
        })
    }
}

#[async_trait]
impl NewsSearch for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        self.rate_limiter.until_ready().await;

        let request = SearchRequest {
            query,
            max_results,
            topic: "news",
            search_depth: "basic",
        };
        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| StockError::SearchError(format!("Tavily request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::SearchError(format!("Tavily API error {status}: {body}")));
        }

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| StockError::SearchError(format!("Failed to parse Tavily response: {e}")))?;

        Ok(data.results.into_iter().map(SearchHit::from).collect())
    }

    fn provider(&self) -> &str {
        "tavily"
    }
}
