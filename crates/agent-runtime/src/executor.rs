//! Agent executor for running tool-calling loops
//!
//! The AgentExecutor implements the core agent loop:
//! 1. Call the model with the conversation and the agent's tools
//! 2. If it asks for tools, run them and feed the results back
//! 3. Repeat until it answers, or the iteration budget runs out
//!
//! When the budget runs out the model gets one last turn without tools and
//! is told to give its final answer.

use agent_core::{Error, Result};
use agent_llm::{CompletionRequest, LLMProvider, Message, StopReason, ToolCall, ToolDefinition};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const FINAL_ANSWER_NUDGE: &str = "You have used all available tool calls. \
Do not call any more tools. Give your best final answer now.";

/// Callbacks fired while an executor runs
///
/// `agent` is the name of the executor that emitted the event, so a single
/// handler can serve every agent of a crew.
#[async_trait]
pub trait ExecutorEventHandler: Send + Sync {
    async fn on_tool_start(&self, _agent: &str, _tool: &str, _input: &Value) {}

    async fn on_tool_done(
        &self,
        _agent: &str,
        _tool: &str,
        _result: std::result::Result<&Value, &str>,
        _duration_ms: u64,
    ) {
    }
}

/// Configuration for one executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    pub model: String,
    pub system_prompt: Option<String>,
    /// Upper bound on model calls that may request tools
    pub max_iterations: usize,
    pub max_tokens: usize,
    pub temperature: Option<f32>,
    pub stop_sequences: Vec<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4-turbo".to_string(),
            system_prompt: None,
            max_iterations: 10,
            max_tokens: 4096,
            temperature: Some(0.1),
            stop_sequences: Vec::new(),
        }
    }
}

/// Runs the model/tool loop for a single agent
pub struct AgentExecutor {
    name: String,
    provider: Arc<dyn LLMProvider>,
    tools: ToolRegistry,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutor {
    pub fn new(
        name: impl Into<String>,
        provider: Arc<dyn LLMProvider>,
        tools: ToolRegistry,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            tools,
            config,
            event_handler: None,
        }
    }

    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run the loop for a single user prompt and return the final text
    pub async fn run(&self, prompt: String) -> Result<String> {
        let mut conversation = vec![Message::user(prompt)];
        let definitions = self.tool_definitions();

        for iteration in 1..=self.config.max_iterations {
            debug!(agent = %self.name, iteration, "agent iteration started");

            let response = self.call_model(&conversation, definitions.clone()).await?;
            let message = response.message;

            match response.stop_reason {
                StopReason::ToolUse if message.has_tool_calls() => {
                    info!(
                        agent = %self.name,
                        tool_count = message.tool_calls.len(),
                        "agent requested tools"
                    );
                    let calls = message.tool_calls.clone();
                    conversation.push(message);
                    for call in &calls {
                        conversation.push(self.execute_tool(call).await);
                    }
                }
                StopReason::MaxTokens => {
                    warn!(agent = %self.name, "model hit the token limit; answer may be truncated");
                    return Ok(message.text().unwrap_or_default().to_string());
                }
                _ => {
                    let text = message.text().unwrap_or_default().to_string();
                    info!(agent = %self.name, iteration, response_length = text.len(), "agent finished");
                    return Ok(text);
                }
            }
        }

        warn!(
            agent = %self.name,
            max_iterations = self.config.max_iterations,
            "iteration limit reached, forcing final answer"
        );
        conversation.push(Message::user(FINAL_ANSWER_NUDGE));
        let response = self.call_model(&conversation, Vec::new()).await?;
        Ok(response.message.text().unwrap_or_default().to_string())
    }

    async fn call_model(
        &self,
        conversation: &[Message],
        tools: Vec<ToolDefinition>,
    ) -> Result<agent_llm::CompletionResponse> {
        let mut builder = CompletionRequest::builder(&self.config.model)
            .messages(conversation.to_vec())
            .max_tokens(self.config.max_tokens)
            .tools(tools)
            .stop_sequences(self.config.stop_sequences.clone());
        if let Some(system) = &self.config.system_prompt {
            builder = builder.system(system.clone());
        }
        if let Some(temperature) = self.config.temperature {
            builder = builder.temperature(temperature);
        }

        let response = self
            .provider
            .complete(builder.build())
            .await
            .map_err(|e| Error::ProcessingFailed(format!("{} model call failed: {e}", self.name)))?;

        debug!(
            agent = %self.name,
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "model response received"
        );
        Ok(response)
    }

    /// Run one tool call; failures become an error result the model can read
    async fn execute_tool(&self, call: &ToolCall) -> Message {
        let input_preview: String = call.arguments.to_string().chars().take(300).collect();
        info!(agent = %self.name, tool = %call.name, input = %input_preview, "executing tool");

        if let Some(handler) = &self.event_handler {
            handler.on_tool_start(&self.name, &call.name, &call.arguments).await;
        }

        let Some(tool) = self.tools.get(&call.name) else {
            let error = format!(
                "Tool '{}' is not available to this agent. Available tools: {}",
                call.name,
                self.tools.names().join(", ")
            );
            warn!(agent = %self.name, tool = %call.name, "model called an unavailable tool");
            if let Some(handler) = &self.event_handler {
                handler.on_tool_done(&self.name, &call.name, Err(&error), 0).await;
            }
            return Message::tool_error(&call.id, error);
        };

        let started = Instant::now();
        let outcome = tool.execute(call.arguments.clone()).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                let content = match &result {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                debug!(agent = %self.name, tool = %call.name, duration_ms, result_length = content.len(), "tool succeeded");
                if let Some(handler) = &self.event_handler {
                    handler.on_tool_done(&self.name, &call.name, Ok(&result), duration_ms).await;
                }
                Message::tool_result(&call.id, content)
            }
            Err(e) => {
                let error = e.to_string();
                warn!(agent = %self.name, tool = %call.name, duration_ms, error = %error, "tool failed");
                if let Some(handler) = &self.event_handler {
                    handler.on_tool_done(&self.name, &call.name, Err(&error), duration_ms).await;
                }
                Message::tool_error(&call.id, error)
            }
        }
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }
}

/// Builder for AgentExecutor
#[derive(Default)]
pub struct AgentExecutorBuilder {
    name: Option<String>,
    provider: Option<Arc<dyn LLMProvider>>,
    tools: ToolRegistry,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
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

    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        Ok(AgentExecutor {
            name: self.name.unwrap_or_else(|| "agent".to_string()),
            provider,
            tools: self.tools,
            config: self.config,
            event_handler: self.event_handler,
        })
    }
}
