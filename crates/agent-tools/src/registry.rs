//! Registry of the tools available to a crew

use crate::Tool;
use agent_core::{Error, Result};
use std::sync::Arc;

/// Ordered, immutable-after-build collection of tools
///
/// Registration order is preserved so tool definitions reach the model in a
/// stable order. Cloning is cheap; tools are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any earlier tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => self.tools[idx] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.name() == name)
    }

    /// Build a registry with only the named tools, in the order given
    ///
    /// Fails on the first name that is not registered.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<ToolRegistry> {
        let mut subset = ToolRegistry::new();
        for name in names {
            let name = name.as_ref();
            let tool = self.get(name).ok_or_else(|| {
                Error::InitializationFailed(format!(
                    "Unknown tool '{name}'; registered tools: {}",
                    self.names().join(", ")
                ))
            })?;
            subset.register(tool);
        }
        Ok(subset)
    }

    /// Merge another registry into this one
    pub fn extend(&mut self, other: ToolRegistry) {
        for tool in other.tools {
            self.register(tool);
        }
    }

    pub fn list_tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};

    struct Named(&'static str);

    #[async_trait]
    impl Tool for Named {
        async fn execute(&self, _params: Value) -> Result<Value> {
            Ok(json!(self.0))
        }
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "test tool"
        }
        fn input_schema(&self) -> Value {
            json!({"type": "object"})
        }
    }

    fn registry() -> ToolRegistry {
        ToolRegistry::new()
            .with(Arc::new(Named("get_stock_data")))
            .with(Arc::new(Named("calculate_metrics")))
            .with(Arc::new(Named("get_news")))
    }

    #[test]
    fn test_registration_order() {
        let reg = registry();
        assert_eq!(reg.names(), ["get_stock_data", "calculate_metrics", "get_news"]);
        assert_eq!(reg.len(), 3);
        assert!(reg.contains("get_news"));
        assert!(reg.get("scrape_website").is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut reg = registry();
        reg.register(Arc::new(Named("get_news")));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_select_subset() {
        let subset = registry().select(&["calculate_metrics", "get_stock_data"]).unwrap();
        assert_eq!(subset.names(), ["calculate_metrics", "get_stock_data"]);

        let empty = registry().select::<&str>(&[]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_select_unknown_fails() {
        let err = registry().select(&["get_financials"]).unwrap_err();
        assert!(matches!(err, Error::InitializationFailed(_)));
        assert!(err.to_string().contains("get_financials"));
    }

    #[tokio::test]
    async fn test_execute_through_registry() {
        let tool = registry().get("get_news").unwrap();
        assert_eq!(tool.execute(json!({})).await.unwrap(), json!("get_news"));
    }
}
