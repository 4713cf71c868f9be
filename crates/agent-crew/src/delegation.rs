//! Coworker tools for agents that may delegate
//!
//! A delegating agent gets two tools. Both run another crew member (with
//! that member's own tools) on a self-contained prompt and return its answer.
//! Coworkers never receive delegation tools themselves.

use agent_core::{Agent, Result, Transcript};
use agent_llm::tools::schema;
use agent_runtime::AgentRuntime;
use agent_tools::{Tool, parse_params};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::AgentProfile;

/// What the delegating agent wants from a coworker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoworkerMode {
    /// Hand over a piece of work
    Delegate,
    /// Ask a question
    Ask,
}

impl CoworkerMode {
    fn tool_name(self) -> &'static str {
        match self {
            Self::Delegate => "delegate_work_to_coworker",
            Self::Ask => "ask_question_to_coworker",
        }
    }

    fn request_field(self) -> &'static str {
        match self {
            Self::Delegate => "task",
            Self::Ask => "question",
        }
    }
}

#[derive(Debug, Deserialize)]
struct CoworkerParams {
    #[serde(alias = "question")]
    task: String,
    #[serde(default)]
    context: String,
    coworker: String,
}

/// Runs another crew member on behalf of the calling agent
pub struct CoworkerTool {
    mode: CoworkerMode,
    runtime: AgentRuntime,
    coworkers: Vec<AgentProfile>,
    description: String,
}

impl CoworkerTool {
    pub fn new(mode: CoworkerMode, runtime: AgentRuntime, coworkers: Vec<AgentProfile>) -> Self {
        let roles = coworker_roles(&coworkers);
        let description = match mode {
            CoworkerMode::Delegate => format!(
                "Delegate a specific task to one of the following coworkers: {roles}. \
                 The input must include the task, all necessary context, and the exact role \
                 of the coworker. They know nothing about the task, so share everything you know."
            ),
            CoworkerMode::Ask => format!(
                "Ask a specific question to one of the following coworkers: {roles}. \
                 The input must include the question, all necessary context, and the exact role \
                 of the coworker. They know nothing about the question, so share everything you know."
            ),
        };

        Self {
            mode,
            runtime,
            coworkers,
            description,
        }
    }

    /// Both coworker tools for a delegating agent
    pub fn pair(runtime: &AgentRuntime, coworkers: &[AgentProfile]) -> [CoworkerTool; 2] {
        [
            Self::new(CoworkerMode::Delegate, runtime.clone(), coworkers.to_vec()),
            Self::new(CoworkerMode::Ask, runtime.clone(), coworkers.to_vec()),
        ]
    }

    fn find(&self, requested: &str) -> Option<&AgentProfile> {
        let wanted = normalize_role(requested);
        self.coworkers
            .iter()
            .find(|p| normalize_role(&p.role) == wanted)
    }
}

fn coworker_roles(coworkers: &[AgentProfile]) -> String {
    coworkers
        .iter()
        .map(|p| p.role.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn normalize_role(role: &str) -> String {
    role.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_lowercase()
}

#[async_trait]
impl Tool for CoworkerTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: CoworkerParams = parse_params(self.name(), params)?;

        let Some(profile) = self.find(&params.coworker) else {
            return Ok(Value::String(format!(
                "Error executing tool. Coworker '{}' not found, it must be one of the following options: {}",
                params.coworker,
                coworker_roles(&self.coworkers)
            )));
        };

        info!(coworker = %profile.role, mode = ?self.mode, "consulting coworker");

        let tools = self.runtime.tools().select(&profile.tools)?;
        let agent = self
            .runtime
            .create_tool_agent(&profile.role, profile.system_prompt(), tools);

        let mut prompt = params.task;
        if !params.context.trim().is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(&params.context);
        }

        let answer = agent.process(prompt, &Transcript::new()).await?;
        Ok(Value::String(answer))
    }

    fn name(&self) -> &str {
        self.mode.tool_name()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        let field = self.mode.request_field();
        let mut properties = serde_json::Map::new();
        properties.insert(
            field.to_string(),
            schema::string(match self.mode {
                CoworkerMode::Delegate => "The task to delegate",
                CoworkerMode::Ask => "The question to ask",
            }),
        );
        properties.insert(
            "context".to_string(),
            schema::string("Everything the coworker needs to know"),
        );
        let roles: Vec<&str> = self.coworkers.iter().map(|p| p.role.as_str()).collect();
        properties.insert(
            "coworker".to_string(),
            schema::string_enum("Role of the coworker", &roles),
        );
        json!({
            "type": "object",
            "properties": properties,
            "required": [field, "context", "coworker"],
        })
    }
}
