//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Result, Transcript};
use async_trait::async_trait;

/// An agent that runs the model/tool loop
///
/// Earlier task outputs from the transcript are appended to the prompt, so
/// each agent sees what the analysts before it concluded.
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

/// Prompt for the executor: task input, then any earlier context
pub fn compose_prompt(input: &str, transcript: &Transcript) -> String {
    match transcript.render_context() {
        Some(context) => format!("{input}\n\n{context}"),
        None => input.to_string(),
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, transcript: &Transcript) -> Result<String> {
        self.executor.run(compose_prompt(&input, transcript)).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::testing::ScriptedProvider;
    use agent_tools::ToolRegistry;
    use std::sync::Arc;

    #[test]
    fn test_compose_prompt() {
        let mut transcript = Transcript::new();
        assert_eq!(compose_prompt("task", &transcript), "task");

        transcript.push("valuation", "Valuation Equity Analyst", "BUY");
        let prompt = compose_prompt("task", &transcript);
        assert!(prompt.starts_with("task\n\nContext from earlier tasks:"));
        assert!(prompt.contains("BUY"));
    }

    #[tokio::test]
    async fn test_process_passes_context_to_model() {
        let provider = Arc::new(ScriptedProvider::new().then_text("SELL"));
        let executor = AgentExecutor::builder()
            .name("Sentiment Equity Analyst")
            .provider(provider.clone())
            .tools(ToolRegistry::new())
            .build()
            .unwrap();
        let agent = ToolAgent::new(executor, "Sentiment Equity Analyst");

        let mut transcript = Transcript::new();
        transcript.push("valuation", "Valuation Equity Analyst", "BUY, strong momentum");

        let out = agent.process("Assess sentiment".into(), &transcript).await.unwrap();
        assert_eq!(out, "SELL");
        assert_eq!(agent.name(), "Sentiment Equity Analyst");

        let prompt = provider.requests()[0].messages[0].text().unwrap().to_string();
        assert!(prompt.contains("Assess sentiment"));
        assert!(prompt.contains("BUY, strong momentum"));
    }
}
