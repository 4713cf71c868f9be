//! Company financial statements

use agent_core::Result as AgentResult;
use agent_llm::tools::schema;
use agent_tools::{Tool, parse_params};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use super::GET_FINANCIALS;
use crate::api::MarketData;
use crate::error::Result;
use crate::model::FinancialStatements;

/// Income statement, balance sheet and cash flow for a ticker
pub struct FinancialsTool {
    market: Arc<dyn MarketData>,
}

#[derive(Debug, Deserialize)]
struct FinancialsParams {
    ticker: String,
}

impl FinancialsTool {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

/// Each statement as its own JSON document, the shape the analysts expect
fn statements_payload(statements: &FinancialStatements) -> Result<Value> {
    Ok(json!({
        "financials": serde_json::to_string(&statements.income_statement)?,
        "balance_sheet": serde_json::to_string(&statements.balance_sheet)?,
        "cash_flow": serde_json::to_string(&statements.cash_flow)?,
    }))
}

#[async_trait]
impl Tool for FinancialsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: FinancialsParams = parse_params(GET_FINANCIALS, params)?;

        let fetched = self.market.financials(&params.ticker).await;
        match fetched.and_then(|s| statements_payload(&s)) {
            Ok(payload) => Ok(payload),
            Err(e) => {
                warn!(ticker = %params.ticker, error = %e, "financial statements unavailable");
                Ok(Value::String(format!(
                    "Error fetching financial data for {}: {e}",
                    params.ticker
                )))
            }
        }
    }

    fn name(&self) -> &str {
        GET_FINANCIALS
    }

    fn description(&self) -> &str {
        "Fetches company financial statements (financials, balance sheet, cash flow) for a \
         given ticker. Input: ticker."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "ticker": schema::string("Stock ticker symbol") }),
            &["ticker"],
        )
    }
}
