//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A chat model that can answer a completion request
///
/// Implemented by the OpenAI-compatible provider and by scripted fakes in
/// tests.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate the next assistant message for the conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name used in logs (e.g. "openai")
    fn name(&self) -> &str;
}
