//! Market data, news and analysis records passed between providers, tools
//! and agents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One daily bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily bars for one ticker over one lookback period, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub period: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reporting period (`YYYY-MM-DD`) -> line item -> value
pub type StatementTable = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub income_statement: StatementTable,
    pub balance_sheet: StatementTable,
    pub cash_flow: StatementTable,
}

impl FinancialStatements {
    pub fn is_empty(&self) -> bool {
        self.income_statement.is_empty() && self.balance_sheet.is_empty() && self.cash_flow.is_empty()
    }
}

/// A raw search engine result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub content: String,
    pub raw_content: Option<String>,
    pub published_date: Option<String>,
}

/// News article in the shape the sentiment tool consumes
///
/// Every field defaults, so the model may pass partial records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub title: String,
    pub body: String,
    pub date: String,
    pub source: String,
    pub url: String,
}

/// Per-article result of the keyword scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredArticle {
    pub title: String,
    pub date: String,
    pub source: String,
    pub url: String,
    pub sentiment_score: i64,
    /// Number of distinct positive keywords found
    pub positive_keywords: usize,
    pub negative_keywords: usize,
}

/// Aggregate keyword sentiment over a batch of articles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    /// Mean of the per-article scores
    pub sentiment_score: f64,
    pub news_summaries: Vec<String>,
    pub detailed_news: Vec<ScoredArticle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_articles: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_articles: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_articles: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neutral_articles: Option<usize>,
}

impl SentimentReport {
    /// Report for an empty batch: zero score, no counts
    pub fn empty() -> Self {
        Self {
            sentiment_score: 0.0,
            news_summaries: Vec::new(),
            detailed_news: Vec::new(),
            total_articles: None,
            positive_articles: None,
            negative_articles: None,
            neutral_articles: None,
        }
    }
}

/// Price row as shown to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// `YYYY-MM-DD`
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl From<&PricePoint> for PriceRow {
    fn from(point: &PricePoint) -> Self {
        Self {
            date: point.timestamp.format("%Y-%m-%d").to_string(),
            open: point.open,
            high: point.high,
            low: point.low,
            close: point.close,
            volume: point.volume,
        }
    }
}

/// Return and volatility figures for a price series
///
/// Volatilities are `None` when fewer than two daily returns exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    pub cumulative_return: f64,
    pub annualized_return: f64,
    pub daily_volatility: Option<f64>,
    pub annualized_volatility: Option<f64>,
    pub price_data_sample: Vec<PriceRow>,
}
