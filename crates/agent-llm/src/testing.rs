//! Scripted provider for offline tests
//!
//! Replays canned responses in order and records every request it receives,
//! so tests can assert on prompts and tool definitions without a network.

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, StopReason,
    TokenUsage, ToolCall,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Provider that answers from a queue of prepared responses
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
    /// Answer used once the queue is empty; `None` makes that an error
    fallback: Option<String>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep answering with `text` after the script runs out
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = Some(text.into());
        self
    }

    /// Queue a plain text answer
    pub fn then_text(self, text: impl Into<String>) -> Self {
        self.push(CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        })
    }

    /// Queue a turn that calls one tool
    pub fn then_tool_call(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        self.push(CompletionResponse {
            message: Message::assistant_tool_calls(None, vec![ToolCall::new(id, name, arguments)]),
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        })
    }

    pub fn then_response(self, response: CompletionResponse) -> Self {
        self.push(response)
    }

    fn push(self, response: CompletionResponse) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
        self
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request);
        }

        let next = self.responses.lock().ok().and_then(|mut q| q.pop_front());
        match (next, &self.fallback) {
            (Some(response), _) => Ok(response),
            (None, Some(text)) => Ok(CompletionResponse {
                message: Message::assistant(text.clone()),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            }),
            (None, None) => Err(LLMError::RequestFailed("script exhausted".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
