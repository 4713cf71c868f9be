//! Shared resources for building agents
//!
//! The AgentRuntime owns what every agent of a crew has in common: the model
//! provider, the full tool registry, model defaults and an optional event
//! handler. Agents are built from it with their own system prompt and tool
//! subset.

use agent_core::{Error, Result};
use agent_llm::LLMProvider;
use agent_tools::ToolRegistry;
use std::sync::Arc;

use crate::agents::ToolAgent;
use crate::executor::{AgentExecutor, ExecutorConfig, ExecutorEventHandler};

/// Model defaults applied to every agent built by the runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub model: String,
    pub max_iterations: usize,
    pub max_tokens: usize,
    pub temperature: Option<f32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let executor = ExecutorConfig::default();
        Self {
            model: executor.model,
            max_iterations: executor.max_iterations,
            max_tokens: executor.max_tokens,
            temperature: executor.temperature,
        }
    }
}

/// Provider, tools and defaults shared by all agents of a crew
///
/// ```no_run
/// use agent_runtime::AgentRuntime;
/// use agent_tools::ToolRegistry;
///
/// # fn example(provider: std::sync::Arc<dyn agent_llm::LLMProvider>) -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder()
///     .provider(provider)
///     .tools(ToolRegistry::new())
///     .model("gpt-4-turbo")
///     .build()?;
///
/// let analyst = runtime.create_tool_agent(
///     "Valuation Equity Analyst",
///     "You are a Valuation Equity Analyst.",
///     ToolRegistry::new(),
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    tools: ToolRegistry,
    config: RuntimeConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentRuntime {
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::default()
    }

    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Every tool known to the crew
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn event_handler(&self) -> Option<&Arc<dyn ExecutorEventHandler>> {
        self.event_handler.as_ref()
    }

    /// Executor settings for an agent with the given system prompt
    pub fn executor_config(&self, system_prompt: impl Into<String>) -> ExecutorConfig {
        ExecutorConfig {
            model: self.config.model.clone(),
            system_prompt: Some(system_prompt.into()),
            max_iterations: self.config.max_iterations,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            stop_sequences: Vec::new(),
        }
    }

    /// Build a tool-calling agent limited to `tools`
    pub fn create_tool_agent(
        &self,
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        tools: ToolRegistry,
    ) -> ToolAgent {
        let name = name.into();
        let mut executor = AgentExecutor::new(
            name.clone(),
            self.provider.clone(),
            tools,
            self.executor_config(system_prompt),
        );
        if let Some(handler) = &self.event_handler {
            executor = executor.with_event_handler(handler.clone());
        }
        ToolAgent::new(executor, name)
    }
}

/// Builder for AgentRuntime
#[derive(Default)]
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tools: ToolRegistry,
    config: RuntimeConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentRuntimeBuilder {
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        if self.config.max_iterations == 0 {
            return Err(Error::InitializationFailed(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        Ok(AgentRuntime {
            provider,
            tools: self.tools,
            config: self.config,
            event_handler: self.event_handler,
        })
    }
}
