//! Agent runtime: the model/tool loop and the agents built on it
//!
//! - [`AgentExecutor`] runs one agent's conversation with tool calls
//! - [`AgentRuntime`] shares provider, tools and defaults across agents
//! - [`ToolAgent`] adapts an executor to the `Agent` trait

pub mod agents;
pub mod executor;
pub mod runtime;

pub use agents::ToolAgent;
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig, ExecutorEventHandler};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};
