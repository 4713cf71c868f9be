//! Task factories for one analysis run
//!
//! Every analyst task interpolates a risk-framing sentence chosen from
//! [`FRAMINGS`] by task kind and risk tolerance.

use agent_crew::Task;

use crate::agents::{DEBATE, FUNDAMENTAL, SENTIMENT, VALUATION};
use crate::risk::RiskTolerance;
use crate::tools::{
    ANALYZE_SENTIMENT, CALCULATE_METRICS, GET_FINANCIALS, GET_NEWS, GET_STOCK_DATA, SCRAPE_WEBSITE,
};

/// Token the moderator writes once consensus is reached
pub const CONSENSUS_SENTINEL: &str = "TERMINATE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Valuation,
    Sentiment,
    Fundamental,
    Debate,
}

impl TaskKind {
    /// Crew order; later tasks read the transcript of earlier ones
    pub const ORDER: [TaskKind; 4] = [Self::Valuation, Self::Sentiment, Self::Fundamental, Self::Debate];

    /// Task id, equal to the key of the agent that runs it
    pub fn id(self) -> &'static str {
        match self {
            Self::Valuation => VALUATION,
            Self::Sentiment => SENTIMENT,
            Self::Fundamental => FUNDAMENTAL,
            Self::Debate => DEBATE,
        }
    }
}

pub const FRAMINGS: [(TaskKind, RiskTolerance, &str); 9] = [
    (
        TaskKind::Valuation,
        RiskTolerance::Averse,
        "Focus on risk mitigation, volatility concerns, and capital preservation.",
    ),
    (
        TaskKind::Valuation,
        RiskTolerance::Neutral,
        "Balance risk and return considerations.",
    ),
    (
        TaskKind::Valuation,
        RiskTolerance::Seeking,
        "Focus on growth potential and higher return opportunities.",
    ),
    (
        TaskKind::Sentiment,
        RiskTolerance::Averse,
        "Be particularly cautious about negative news and sentiment.",
    ),
    (
        TaskKind::Sentiment,
        RiskTolerance::Neutral,
        "Balance positive and negative sentiment factors.",
    ),
    (
        TaskKind::Sentiment,
        RiskTolerance::Seeking,
        "Focus on positive momentum and growth sentiment.",
    ),
    (
        TaskKind::Fundamental,
        RiskTolerance::Averse,
        "Focus on financial stability, strong balance sheets, and consistent performance.",
    ),
    (
        TaskKind::Fundamental,
        RiskTolerance::Neutral,
        "Balance financial health with growth prospects.",
    ),
    (
        TaskKind::Fundamental,
        RiskTolerance::Seeking,
        "Focus on growth potential, even if current financials are weaker.",
    ),
];

/// Framing sentence for an analyst task; the debate has none
pub fn risk_framing(kind: TaskKind, risk: RiskTolerance) -> Option<&'static str> {
    FRAMINGS
        .iter()
        .find(|(k, r, _)| *k == kind && *r == risk)
        .map(|(_, _, framing)| *framing)
}

fn framing(kind: TaskKind, risk: RiskTolerance) -> &'static str {
    risk_framing(kind, risk).unwrap_or_default()
}

fn task(kind: TaskKind, description: String, expected_output: &str, tools: &[&str]) -> Task {
    Task {
        id: kind.id().to_string(),
        description,
        expected_output: expected_output.to_string(),
        agent: kind.id().to_string(),
        tools: Some(tools.iter().map(ToString::to_string).collect()),
        stop_sentinel: None,
    }
}

pub fn valuation_task(ticker: &str, risk: RiskTolerance) -> Task {
    let description = format!(
        "Analyze the valuation trends of {ticker} stock.\n\
         {framing}\n\
         Calculate and consider key metrics including:\n\
         - Cumulative returns\n\
         - Annualized returns\n\
         - Volatility measures\n\
         - Price trends and patterns.\n\
         Use the `{CALCULATE_METRICS}` and `{GET_STOCK_DATA}` tools to gather the necessary data.\n\n\
         Provide a BUY or SELL recommendation with detailed justification based on the \
         valuation analysis and the {risk} risk tolerance.",
        framing = framing(TaskKind::Valuation, risk),
    );
    task(
        TaskKind::Valuation,
        description,
        "A detailed valuation analysis with metrics, trend analysis, and a clear BUY/SELL recommendation.",
        &[CALCULATE_METRICS, GET_STOCK_DATA],
    )
}

pub fn sentiment_task(ticker: &str, risk: RiskTolerance) -> Task {
    let description = format!(
        "Analyze news sentiment and market perception for {ticker}.\n\
         {framing}\n\
         Consider:\n\
         - Recent news articles and their tone. Use the `{GET_NEWS}` tool.\n\
         - Sentiment of that news, scored with the `{ANALYZE_SENTIMENT}` tool.\n\
         - Analyst rating changes (if available through `{SCRAPE_WEBSITE}` or other means).\n\
         - Market sentiment indicators.\n\
         - Any significant corporate events or disclosures.\n\n\
         Provide a BUY or SELL recommendation based on sentiment analysis and the {risk} risk tolerance.",
        framing = framing(TaskKind::Sentiment, risk),
    );
    task(
        TaskKind::Sentiment,
        description,
        "A sentiment analysis summary with news highlights and a clear BUY/SELL recommendation.",
        &[GET_NEWS, ANALYZE_SENTIMENT, SCRAPE_WEBSITE],
    )
}

pub fn fundamental_task(ticker: &str, risk: RiskTolerance) -> Task {
    let description = format!(
        "Conduct fundamental analysis of {ticker} based on available financial data.\n\
         {framing}\n\
         Analyze:\n\
         - Revenue trends and growth\n\
         - Profitability metrics\n\
         - Cash flow stability\n\
         - Balance sheet strength\n\
         - Any areas of concern or competitive advantages.\n\
         Use the `{GET_FINANCIALS}` tool to gather the necessary data.\n\n\
         Provide a BUY or SELL recommendation based on fundamental analysis and the {risk} risk tolerance.",
        framing = framing(TaskKind::Fundamental, risk),
    );
    task(
        TaskKind::Fundamental,
        description,
        "A comprehensive fundamental analysis with financial metrics and a clear BUY/SELL recommendation.",
        &[GET_FINANCIALS, SCRAPE_WEBSITE],
    )
}

/// Moderated debate over the three analyses; ends with [`CONSENSUS_SENTINEL`]
pub fn debate_task(ticker: &str, risk: RiskTolerance, purchase_price: f64) -> Task {
    let description = format!(
        "Reference purchase price of the stock is {purchase_price:.2}\n\
         Coordinate a debate among the valuation, sentiment, and fundamental analysts \
         about {ticker} stock with {risk} risk tolerance.\n\n\
         Ensure each analyst presents their analysis and recommendation at least twice, \
         using the information generated from their respective tasks.\n\
         Facilitate discussion until consensus is reached.\n\
         Consolidate all perspectives into a final comprehensive stock analysis report.\n\n\
         The report should include:\n\
         1. Executive summary with consensus recommendation\n\
         2. Detailed analysis from each perspective\n\
         3. Key positive indicators and concerns\n\
         4. Final investment recommendation (BUY/SELL)\n\
         5. Risk assessment aligned with the {risk} profile\n\n\
         Reply \"{CONSENSUS_SENTINEL}\" when the debate is complete and consensus is reached."
    );
    Task {
        stop_sentinel: Some(CONSENSUS_SENTINEL.to_string()),
        ..task(
            TaskKind::Debate,
            description,
            "A comprehensive stock analysis report with consensus recommendation and detailed rationale.",
            &[],
        )
    }
}

/// The four tasks of a run, in crew order
pub fn build_tasks(ticker: &str, risk: RiskTolerance, purchase_price: f64) -> Vec<Task> {
    TaskKind::ORDER
        .iter()
        .map(|kind| match kind {
            TaskKind::Valuation => valuation_task(ticker, risk),
            TaskKind::Sentiment => sentiment_task(ticker, risk),
            TaskKind::Fundamental => fundamental_task(ticker, risk),
            TaskKind::Debate => debate_task(ticker, risk, purchase_price),
        })
        .collect()
}
