//! The stock analysis crew and its entry point

use agent_crew::{Crew, CrewEventHandler, TaskOutput};
use agent_llm::LLMProvider;
use agent_llm::providers::{OpenAIConfig, OpenAIProvider};
use agent_runtime::{AgentRuntime, ExecutorEventHandler, RuntimeConfig};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::agents::crew_agents;
use crate::api::{MarketData, NewsSearch, SerperClient, TavilyClient, YahooFinanceClient};
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::risk::RiskTolerance;
use crate::tasks::build_tasks;
use crate::tools::stock_tools;

/// Outcome of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,
    pub ticker: String,
    pub risk_tolerance: RiskTolerance,
    /// Moderator's consolidated report, sentinel removed
    pub report: String,
    pub consensus_reached: bool,
    /// Every task's output in run order
    pub tasks: Vec<TaskOutput>,
}

/// Four-agent crew producing a BUY/SELL recommendation
///
/// ```no_run
/// use stock_crew::{RiskTolerance, StockConfig, StockCrew};
///
/// # async fn example() -> stock_crew::Result<()> {
/// let crew = StockCrew::from_config(StockConfig::from_env()?)?;
/// let report = crew.analyze_stock("TATAMOTORS.NS", RiskTolerance::Neutral).await?;
/// println!("{}", report.report);
/// # Ok(())
/// # }
/// ```
pub struct StockCrew {
    runtime: AgentRuntime,
    config: StockConfig,
    crew_events: Option<Arc<dyn CrewEventHandler>>,
}

impl StockCrew {
    pub fn builder(config: StockConfig) -> StockCrewBuilder {
        StockCrewBuilder::new(config)
    }

    /// Live crew: OpenAI-compatible model, Yahoo market data, and Tavily or
    /// Serper news search when a key is configured
    pub fn from_config(config: StockConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    pub fn runtime(&self) -> &AgentRuntime {
        &self.runtime
    }

    /// Run the four tasks in order and return the moderator's report
    ///
    /// The ticker goes to the agents and data providers as given.
    pub async fn analyze_stock(&self, ticker: &str, risk: RiskTolerance) -> Result<AnalysisReport> {
        info!("Starting analysis for {ticker} with {risk} risk tolerance...");

        let mut builder = Crew::builder()
            .agents(crew_agents())
            .tasks(build_tasks(ticker, risk, self.config.purchase_price));
        if let Some(handler) = &self.crew_events {
            builder = builder.event_handler(handler.clone());
        }
        let output = builder.build()?.kickoff(&self.runtime).await?;

        let consensus_reached = output.consensus_reached();
        if !consensus_reached {
            warn!(ticker, run_id = %output.run_id, "moderator did not signal consensus");
        }
        info!(ticker, run_id = %output.run_id, "analysis finished");

        Ok(AnalysisReport {
            run_id: output.run_id,
            ticker: ticker.to_string(),
            risk_tolerance: risk,
            report: output.final_output().to_string(),
            consensus_reached,
            tasks: output.tasks,
        })
    }
}

/// Builder for StockCrew; unset collaborators default to the live clients
pub struct StockCrewBuilder {
    config: StockConfig,
    provider: Option<Arc<dyn LLMProvider>>,
    market: Option<Arc<dyn MarketData>>,
    search: Option<Arc<dyn NewsSearch>>,
    crew_events: Option<Arc<dyn CrewEventHandler>>,
    executor_events: Option<Arc<dyn ExecutorEventHandler>>,
}

impl StockCrewBuilder {
    pub fn new(config: StockConfig) -> Self {
        Self {
            config,
            provider: None,
            market: None,
            search: None,
            crew_events: None,
            executor_events: None,
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn market_data(mut self, market: Arc<dyn MarketData>) -> Self {
        self.market = Some(market);
        self
    }

    pub fn news_search(mut self, search: Arc<dyn NewsSearch>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn crew_events(mut self, handler: Arc<dyn CrewEventHandler>) -> Self {
        self.crew_events = Some(handler);
        self
    }

    pub fn executor_events(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.executor_events = Some(handler);
        self
    }

    fn live_provider(config: &StockConfig) -> Result<Arc<dyn LLMProvider>> {
        let api_key = config.openai_api_key.clone().ok_or_else(|| {
            StockError::ConfigError("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        let mut openai = OpenAIConfig::new(api_key).with_timeout(config.request_timeout.as_secs().max(60));
        if let Some(base) = &config.openai_api_base {
            openai = openai.with_api_base(base);
        }
        Ok(Arc::new(OpenAIProvider::with_config(openai)?))
    }

    fn live_search(config: &StockConfig) -> Result<Option<Arc<dyn NewsSearch>>> {
        let timeout = config.request_timeout;
        let rate = config.search_rate_per_minute;
        if let Some(key) = &config.tavily_api_key {
            let client = TavilyClient::with_base_url(key, &config.tavily_base_url, rate, timeout)?;
            return Ok(Some(Arc::new(client)));
        }
        if let Some(key) = &config.serper_api_key {
            let client = SerperClient::with_base_url(key, &config.serper_base_url, rate, timeout)?;
            return Ok(Some(Arc::new(client)));
        }
        warn!("no TAVILY_API_KEY or SERPER_API_KEY set; news search will report an error");
        Ok(None)
    }

    pub fn build(self) -> Result<StockCrew> {
        let config = self.config;
        config.validate()?;

        let provider = match self.provider {
            Some(provider) => provider,
            None => Self::live_provider(&config)?,
        };
        let market: Arc<dyn MarketData> = match self.market {
            Some(market) => market,
            None => Arc::new(YahooFinanceClient::with_base_url(
                &config.yahoo_base_url,
                config.request_timeout,
            )?),
        };
        let search = match self.search {
            Some(search) => Some(search),
            None => Self::live_search(&config)?,
        };

        let mut runtime = AgentRuntime::builder()
            .provider(provider)
            .tools(stock_tools(market, search, &config)?)
            .config(RuntimeConfig {
                model: config.model.clone(),
                max_iterations: config.max_iterations,
                max_tokens: config.max_tokens,
                temperature: Some(config.temperature),
            });
        if let Some(handler) = self.executor_events {
            runtime = runtime.event_handler(handler);
        }

        Ok(StockCrew {
            runtime: runtime.build()?,
            config,
            crew_events: self.crew_events,
        })
    }
}
