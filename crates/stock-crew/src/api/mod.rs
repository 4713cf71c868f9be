//! Clients for market data and news search providers
//!
//! Tools depend on the [`MarketData`] and [`NewsSearch`] traits so tests can
//! substitute fakes for the live Yahoo, Tavily and Serper clients.

pub mod serper;
pub mod tavily;
pub mod yahoo;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::Result;
use crate::model::{FinancialStatements, PriceSeries, SearchHit};

pub use serper::SerperClient;
pub use tavily::TavilyClient;
pub use yahoo::YahooFinanceClient;

/// Lookback periods understood by the chart endpoint
pub const VALID_PERIODS: [&str; 11] = [
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

pub(crate) type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub(crate) fn per_minute(requests: u32) -> SharedRateLimiter {
    let quota = Quota::per_minute(NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::direct(quota))
}

/// Price history, statements and issuer names for a ticker
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Daily bars over `period` (one of [`VALID_PERIODS`])
    async fn price_history(&self, ticker: &str, period: &str) -> Result<PriceSeries>;

    async fn financials(&self, ticker: &str) -> Result<FinancialStatements>;

    /// Issuer display name, if the provider knows one
    async fn company_name(&self, ticker: &str) -> Result<Option<String>>;
}

/// Web or news search backend
#[async_trait]
pub trait NewsSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;

    fn provider(&self) -> &str;
}
