//! Serper (Google News) search API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{NewsSearch, SharedRateLimiter, per_minute};
use crate::config::SERPER_BASE_URL;
use crate::error::{Result, StockError};
use crate::model::SearchHit;

/// Serper news search, used when no Tavily key is configured
pub struct SerperClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

#[derive(Debug, Serialize)]
struct NewsRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    news: Vec<SerperArticle>,
}

#[derive(Debug, Deserialize)]
struct SerperArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    date: Option<String>,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        Self::with_base_url(api_key, SERPER_BASE_URL, rate_limit, timeout)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        rate_limit: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(StockError::ConfigError("Serper API key is empty".to_string()));
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
impl NewsSearch for SerperClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .post(format!("{}/news", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .json(&NewsRequest { q: query, num: max_results })
            .send()
            .await
            .map_err(|e| StockError::SearchError(format!("Serper request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::SearchError(format!("Serper API error {status}: {body}")));
        }

        let data: NewsResponse = response
            .json()
            .await
            .map_err(|e| StockError::SearchError(format!("Failed to parse Serper response: {e}")))?;

        // Serper dates are relative ("2 hours ago"); keep them as given
        Ok(data
            .news
            .into_iter()
            .take(max_results)
            .map(|a| SearchHit {
                title: a.title,
                url: a.link,
                content: a.snippet,
                raw_content: None,
                published_date: a.date,
            })
            .collect())
    }

    fn provider(&self) -> &str {
        "serper"
    }
}
