//! Configuration for a stock analysis run

use agent_utils::env;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::VALID_PERIODS;
use crate::error::{Result, StockError};

pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_PERIOD: &str = "3mo";
pub const DEFAULT_PURCHASE_PRICE: f64 = 957.60;
pub const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";
pub const SERPER_BASE_URL: &str = "https://google.serper.dev";

/// Settings for the model, the data providers and the crew tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Key for the OpenAI-compatible chat endpoint
    pub openai_api_key: Option<String>,
    /// Override of the chat endpoint base URL
    pub openai_api_base: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
    /// Model round trips allowed per agent before a final answer is forced
    pub max_iterations: usize,

    /// Timeout applied to every HTTP client
    pub request_timeout: Duration,

    /// Lookback used when a tool call omits `period`
    pub default_period: String,
    pub news_max_results: usize,
    pub scrape_max_chars: usize,
    /// Reference purchase price quoted to the debate moderator
    pub purchase_price: f64,

    pub tavily_api_key: Option<String>,
    pub serper_api_key: Option<String>,
    pub search_rate_per_minute: u32,

    pub yahoo_base_url: String,
    pub tavily_base_url: String,
    pub serper_base_url: String,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_api_base: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 4096,
            max_iterations: 10,
            request_timeout: Duration::from_secs(30),
            default_period: DEFAULT_PERIOD.to_string(),
            news_max_results: 5,
            scrape_max_chars: 8000,
            purchase_price: DEFAULT_PURCHASE_PRICE,
            tavily_api_key: None,
            serper_api_key: None,
            search_rate_per_minute: 60,
            yahoo_base_url: YAHOO_BASE_URL.to_string(),
            tavily_base_url: TAVILY_BASE_URL.to_string(),
            serper_base_url: SERPER_BASE_URL.to_string(),
        }
    }
}

impl StockConfig {
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Read settings from the environment on top of the defaults
    ///
    /// `SERPER_API_KEY` falls back to the legacy `seper_key` spelling.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            openai_api_key: env::optional("OPENAI_API_KEY"),
            openai_api_base: env::optional("OPENAI_API_BASE"),
            tavily_api_key: env::optional("TAVILY_API_KEY"),
            serper_api_key: env::optional("SERPER_API_KEY").or_else(|| env::optional("seper_key")),
            ..Self::default()
        };

        if let Some(model) = env::optional("OPENAI_MODEL") {
            config.model = model;
        }
        if let Some(period) = env::optional("STOCK_CREW_PERIOD") {
            config.default_period = period;
        }
        if let Some(price) = env::parsed::<f64>("STOCK_CREW_PURCHASE_PRICE")? {
            config.purchase_price = price;
        }
        if let Some(iterations) = env::parsed::<usize>("STOCK_CREW_MAX_ITERATIONS")? {
            config.max_iterations = iterations;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(StockError::ConfigError("model must not be empty".to_string()));
        }
        if self.max_iterations == 0 {
            return Err(StockError::ConfigError(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(StockError::ConfigError(format!(
                "temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }
        if !VALID_PERIODS.contains(&self.default_period.as_str()) {
            return Err(StockError::InvalidPeriod(self.default_period.clone()));
        }
        if !self.purchase_price.is_finite() || self.purchase_price <= 0.0 {
            return Err(StockError::ConfigError(format!(
                "purchase price must be positive, got {}",
                self.purchase_price
            )));
        }
        if self.news_max_results == 0 {
            return Err(StockError::ConfigError(
                "news_max_results must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// True when some news search backend is configured
    pub fn has_search_backend(&self) -> bool {
        self.tavily_api_key.is_some() || self.serper_api_key.is_some()
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    config: StockConfig,
}

impl StockConfigBuilder {
    pub fn openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.openai_api_key = Some(key.into());
        self
    }

    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.config.openai_api_base = Some(base.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn default_period(mut self, period: impl Into<String>) -> Self {
        self.config.default_period = period.into();
        self
    }

    pub fn news_max_results(mut self, max: usize) -> Self {
        self.config.news_max_results = max;
        self
    }

    pub fn scrape_max_chars(mut self, max: usize) -> Self {
        self.config.scrape_max_chars = max;
        self
    }

    pub fn purchase_price(mut self, price: f64) -> Self {
        self.config.purchase_price = price;
        self
    }

    pub fn tavily_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.tavily_api_key = Some(key.into());
        self
    }

    pub fn serper_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.serper_api_key = Some(key.into());
        self
    }

    pub fn search_rate_per_minute(mut self, rate: u32) -> Self {
        self.config.search_rate_per_minute = rate;
        self
    }

    pub fn yahoo_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.yahoo_base_url = url.into();
        self
    }

    pub fn tavily_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.tavily_base_url = url.into();
        self
    }

    pub fn serper_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.serper_base_url = url.into();
        self
    }

    pub fn build(self) -> Result<StockConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.model, "gpt-4-turbo");
        assert_eq!(config.default_period, "3mo");
        assert_eq!(config.news_max_results, 5);
        assert!((config.purchase_price - 957.60).abs() < f64::EPSILON);
        assert!((config.temperature - 0.1).abs() < f32::EPSILON);
        assert!(!config.has_search_backend());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StockConfig::builder()
            .model("gpt-4o-mini")
            .default_period("6mo")
            .purchase_price(1000.0)
            .tavily_api_key("tvly-test")
            .build()
            .unwrap();

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.default_period, "6mo");
        assert!(config.has_search_backend());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            StockConfig::builder().default_period("7w").build(),
            Err(StockError::InvalidPeriod(_))
        ));
        assert!(StockConfig::builder().max_iterations(0).build().is_err());
        assert!(StockConfig::builder().purchase_price(-1.0).build().is_err());
        assert!(StockConfig::builder().temperature(3.0).build().is_err());
        assert!(StockConfig::builder().news_max_results(0).build().is_err());
    }
}
