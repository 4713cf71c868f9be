//! LLM provider abstraction layer
//!
//! Provider-agnostic types for talking to a chat model with tool calling:
//!
//! - Message types for a conversation, including tool calls and results
//! - Completion request/response types
//! - Tool definitions advertised to the model
//! - The `LLMProvider` trait
//! - An OpenAI-compatible chat completions provider (feature `openai`)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role, ToolCall};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;

#[cfg(feature = "openai")]
pub mod providers;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
