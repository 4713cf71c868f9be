//! Tool trait definition

use agent_core::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A function a model can call while working on a task
///
/// Data-provider failures should be returned inside the `Ok` payload as a
/// descriptive message the model can read. `Err` is reserved for calls the
/// tool cannot interpret at all, such as arguments that do not match
/// [`Tool::input_schema`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with the model-supplied arguments
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Unique name within a registry; this is what the model calls
    fn name(&self) -> &str;

    /// Tells the model when the tool is useful
    fn description(&self) -> &str;

    /// JSON schema of the arguments object
    fn input_schema(&self) -> Value;
}

/// Deserialize tool arguments, naming the tool in the error
pub fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| Error::ProcessingFailed(format!("Invalid parameters for {tool}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        ticker: String,
        #[serde(default)]
        period: Option<String>,
    }

    #[test]
    fn test_parse_params() {
        let p: Params = parse_params("get_stock_data", json!({"ticker": "TSLA"})).unwrap();
        assert_eq!(p.ticker, "TSLA");
        assert!(p.period.is_none());

        let err = parse_params::<Params>("get_stock_data", json!({"period": "3mo"})).unwrap_err();
        assert!(err.to_string().contains("Invalid parameters for get_stock_data"));
    }
}
