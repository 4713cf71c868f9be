//! End-to-end crew runs with a scripted model and in-memory data providers

use agent_crew::{AgentProfile, CrewEventHandler, Task};
use agent_llm::testing::ScriptedProvider;
use agent_llm::{CompletionRequest, Role};
use async_trait::async_trait;
use chrono::{DateTime, Duration};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use stock_crew::api::{MarketData, NewsSearch};
use stock_crew::model::{FinancialStatements, PricePoint, PriceSeries, SearchHit};
use stock_crew::{RiskTolerance, StockConfig, StockCrew, StockError};

struct FakeMarket;

#[async_trait]
impl MarketData for FakeMarket {
    async fn price_history(&self, ticker: &str, period: &str) -> stock_crew::Result<PriceSeries> {
        let start = DateTime::from_timestamp(1_704_153_600, 0).unwrap();
        let points = [900.0, 930.0, 915.0, 990.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                timestamp: start + Duration::days(i64::try_from(i).unwrap()),
                open: close - 5.0,
                high: close + 10.0,
                low: close - 10.0,
                close,
                volume: 2_500_000,
            })
            .collect();
        Ok(PriceSeries {
            ticker: ticker.to_string(),
            period: period.to_string(),
            points,
        })
    }

    async fn financials(&self, _ticker: &str) -> stock_crew::Result<FinancialStatements> {
        let mut statements = FinancialStatements::default();
        statements
            .income_statement
            .insert("2024-03-31".into(), BTreeMap::from([("TotalRevenue".to_string(), 4.3e12)]));
        Ok(statements)
    }

    async fn company_name(&self, _ticker: &str) -> stock_crew::Result<Option<String>> {
        Ok(Some("Tata Motors Limited".to_string()))
    }
}

#[derive(Default)]
struct FakeSearch {
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl NewsSearch for FakeSearch {
    async fn search(&self, query: &str, _max_results: usize) -> stock_crew::Result<Vec<SearchHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(vec![SearchHit {
            title: "Tata Motors profit beat".into(),
            url: "https://www.reuters.com/tata".into(),
            content: "Strong growth in JLR sales".into(),
            raw_content: None,
            published_date: Some("2024-05-10".into()),
        }])
    }

    fn provider(&self) -> &str {
        "fake"
    }
}

#[derive(Default)]
struct Progress(Mutex<Vec<String>>);

#[async_trait]
impl CrewEventHandler for Progress {
    async fn on_task_start(&self, index: usize, total: usize, task: &Task, agent: &AgentProfile) {
        self.0
            .lock()
            .unwrap()
            .push(format!("[{}/{}] {} ({})", index + 1, total, task.id, agent.role));
    }
}

fn tool_results(request: &CompletionRequest) -> Vec<String> {
    request
        .messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .filter_map(|m| m.text().map(str::to_string))
        .collect()
}

fn crew(provider: Arc<ScriptedProvider>, search: Arc<FakeSearch>, progress: Arc<Progress>) -> StockCrew {
    StockCrew::builder(StockConfig::default())
        .provider(provider)
        .market_data(Arc::new(FakeMarket))
        .news_search(search)
        .crew_events(progress)
        .build()
        .unwrap()
}

#[tokio::test]
async fn analyze_stock_runs_four_tasks_in_order() {
    let provider = Arc::new(
        ScriptedProvider::new()
            .then_tool_call("v1", "calculate_metrics", json!({"ticker": "TATAMOTORS"}))
            .then_text("Valuation: 10% cumulative return. BUY")
            .then_tool_call("s1", "get_news", json!({"ticker": "TATAMOTORS"}))
            .then_text("Sentiment: positive coverage. BUY")
            .then_tool_call("f1", "get_financials", json!({"ticker": "TATAMOTORS"}))
            .then_text("Fundamental: revenue up. BUY")
            .then_tool_call(
                "d1",
                "ask_question_to_coworker",
                json!({
                    "question": "Does the valuation still support BUY?",
                    "context": "All three analysts said BUY",
                    "coworker": "Valuation Equity Analyst"
                }),
            )
            .then_text("Yes, momentum supports BUY")
            .then_text("Consensus: BUY at 957.60 reference.\nTERMINATE"),
    );
    let search = Arc::new(FakeSearch::default());
    let progress = Arc::new(Progress::default());

    let report = crew(provider.clone(), search.clone(), progress.clone())
        .analyze_stock("  TATAMOTORS ", RiskTolerance::Neutral)
        .await
        .unwrap();

    assert_eq!(report.ticker, "TATAMOTORS");
    assert_eq!(report.report, "Consensus: BUY at 957.60 reference.");
    assert!(report.consensus_reached);
    let ids: Vec<_> = report.tasks.iter().map(|t| t.task_id.as_str()).collect();
    assert_eq!(ids, ["valuation", "sentiment", "fundamental", "debate"]);
    assert_eq!(
        *progress.0.lock().unwrap(),
        [
            "[1/4] valuation (Valuation Equity Analyst)",
            "[2/4] sentiment (Sentiment Equity Analyst)",
            "[3/4] fundamental (Fundamental Financial Equity Analyst)",
            "[4/4] debate (Debate Moderator)",
        ]
    );

    let requests = provider.requests();
    assert_eq!(requests.len(), 9);

    // each analyst only sees its task's tools
    let names = |r: &CompletionRequest| r.tools.iter().map(|t| t.name.clone()).collect::<Vec<_>>();
    assert_eq!(names(&requests[0]), ["calculate_metrics", "get_stock_data"]);
    assert_eq!(names(&requests[2]), ["get_news", "analyze_sentiment", "scrape_website"]);
    assert_eq!(names(&requests[4]), ["get_financials", "scrape_website"]);
    assert_eq!(names(&requests[6]), ["delegate_work_to_coworker", "ask_question_to_coworker"]);

    let metrics: Value = serde_json::from_str(&tool_results(&requests[1])[0]).unwrap();
    assert!((metrics["cumulative_return"].as_f64().unwrap() - 0.1).abs() < 1e-12);

    let news: Value = serde_json::from_str(&tool_results(&requests[3])[0]).unwrap();
    assert_eq!(news["news"][0]["source"], "reuters.com");
    assert_eq!(
        *search.queries.lock().unwrap(),
        ["Tata Motors Limited TATAMOTORS stock news financial earnings"]
    );

    let financials: Value = serde_json::from_str(&tool_results(&requests[5])[0]).unwrap();
    assert!(financials["financials"].as_str().unwrap().contains("TotalRevenue"));

    // the coworker answers from a fresh conversation with its own role
    assert!(requests[7].system.as_deref().unwrap().starts_with("You are Valuation Equity Analyst."));
    assert_eq!(tool_results(&requests[8]), ["Yes, momentum supports BUY"]);

    // the moderator sees the three analyses and the purchase price
    let debate_prompt = requests[6].messages[0].text().unwrap();
    assert!(debate_prompt.contains("Reference purchase price of the stock is 957.60"));
    assert!(debate_prompt.contains("Valuation: 10% cumulative return. BUY"));
    assert!(debate_prompt.contains("Fundamental: revenue up. BUY"));
}

#[tokio::test]
async fn analyze_stock_without_sentinel_still_reports() {
    let provider = Arc::new(ScriptedProvider::new().with_fallback("SELL, no consensus marker"));
    let report = crew(provider, Arc::new(FakeSearch::default()), Arc::new(Progress::default()))
        .analyze_stock("INFY", RiskTolerance::Averse)
        .await
        .unwrap();

    assert_eq!(report.report, "SELL, no consensus marker");
    assert!(!report.consensus_reached);
    assert_eq!(report.risk_tolerance, RiskTolerance::Averse);
}

#[tokio::test]
async fn sentinel_inside_a_word_is_not_consensus() {
    let provider = Arc::new(ScriptedProvider::new().with_fallback("JLR contract TERMINATED early. SELL"));
    let report = crew(provider, Arc::new(FakeSearch::default()), Arc::new(Progress::default()))
        .analyze_stock("TATAMOTORS", RiskTolerance::Neutral)
        .await
        .unwrap();

    assert_eq!(report.report, "JLR contract TERMINATED early. SELL");
    assert!(!report.consensus_reached);
}

#[tokio::test]
async fn analyze_stock_passes_ticker_through() {
    let provider = Arc::new(ScriptedProvider::new().with_fallback("BUY\nTERMINATE"));
    let report = crew(provider.clone(), Arc::new(FakeSearch::default()), Arc::new(Progress::default()))
        .analyze_stock(" tatamotors.ns", RiskTolerance::Neutral)
        .await
        .unwrap();

    assert_eq!(report.ticker, " tatamotors.ns");
    let first_prompt = provider.requests()[0].messages[0].text().unwrap().to_string();
    assert!(first_prompt.contains("Analyze the valuation trends of  tatamotors.ns stock."));
}

#[tokio::test]
async fn model_failure_surfaces_as_analysis_error() {
    // script exhausted on the first call
    let provider = Arc::new(ScriptedProvider::new());
    let err = crew(provider, Arc::new(FakeSearch::default()), Arc::new(Progress::default()))
        .analyze_stock("TATAMOTORS", RiskTolerance::Seeking)
        .await
        .unwrap_err();

    assert!(matches!(err, StockError::AnalysisFailed(_)));
    assert!(err.to_string().contains("valuation"));
}

#[test]
fn live_crew_requires_openai_key() {
    let err = StockCrew::from_config(StockConfig::default()).err().unwrap();
    assert!(matches!(err, StockError::ConfigError(ref m) if m.contains("OPENAI_API_KEY")));
}
