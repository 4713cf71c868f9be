//! Error types for stock analysis operations

use agent_utils::EnvError;
use thiserror::Error;

/// Stock analysis specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// A data provider answered with an error status or unusable body
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid period '{0}'")]
    InvalidPeriod(String),

    #[error("Data not available for {ticker}: {reason}")]
    DataUnavailable { ticker: String, reason: String },

    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    #[error("News search error: {0}")]
    SearchError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Environment error: {0}")]
    EnvError(#[from] EnvError),

    #[error("LLM provider error: {0}")]
    LlmError(#[from] agent_llm::LLMError),

    /// Failure inside the crew run (agent, tool or model loop)
    #[error("Analysis failed: {0}")]
    AnalysisFailed(#[from] agent_core::Error),
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

impl From<StockError> for agent_core::Error {
    fn from(err: StockError) -> Self {
        match err {
            StockError::AnalysisFailed(inner) => inner,
            other => agent_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}
