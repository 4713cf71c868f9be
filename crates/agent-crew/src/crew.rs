//! Sequential crew definition and execution

use agent_core::{Agent, Error, Result, Transcript};
use agent_runtime::AgentRuntime;
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::delegation::CoworkerTool;
use crate::{AgentProfile, CrewOutput, Task, TaskOutput};

/// Progress callbacks for a crew run
///
/// `index` is zero-based; `total` is the number of tasks in the run.
#[async_trait]
pub trait CrewEventHandler: Send + Sync {
    async fn on_task_start(&self, _index: usize, _total: usize, _task: &Task, _agent: &AgentProfile) {}

    async fn on_task_complete(&self, _index: usize, _total: usize, _output: &TaskOutput) {}
}

/// Agents plus an ordered task list
///
/// ```no_run
/// use agent_crew::{AgentProfile, Crew, Task};
/// # async fn example(runtime: agent_runtime::AgentRuntime) -> agent_core::Result<()> {
/// let analyst = AgentProfile::new("valuation", "Valuation Equity Analyst", "Value stocks", "CFA");
/// let task = Task::builder("valuation")
///     .description("Value TATAMOTORS")
///     .expected_output("BUY or SELL")
///     .agent("valuation")
///     .build()?;
///
/// let output = Crew::builder().agent(analyst).task(task).build()?.kickoff(&runtime).await?;
/// println!("{}", output.final_output());
/// # Ok(())
/// # }
/// ```
pub struct Crew {
    agents: Vec<AgentProfile>,
    tasks: Vec<Task>,
    event_handler: Option<Arc<dyn CrewEventHandler>>,
}

impl Crew {
    pub fn builder() -> CrewBuilder {
        CrewBuilder::default()
    }

    pub fn agents(&self) -> &[AgentProfile] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn profile(&self, key: &str) -> Result<&AgentProfile> {
        self.agents.iter().find(|p| p.key == key).ok_or_else(|| {
            Error::InitializationFailed(format!("No agent with key '{key}' in this crew"))
        })
    }

    /// Tool registry for one task: its tool names, plus coworker tools when
    /// the agent may delegate
    fn task_tools(
        &self,
        runtime: &AgentRuntime,
        task: &Task,
        profile: &AgentProfile,
    ) -> Result<ToolRegistry> {
        let mut tools = runtime.tools().select(task.effective_tools(&profile.tools))?;

        if profile.allow_delegation {
            let coworkers: Vec<AgentProfile> = self
                .agents
                .iter()
                .filter(|p| p.key != profile.key)
                .cloned()
                .collect();
            if !coworkers.is_empty() {
                for tool in CoworkerTool::pair(runtime, &coworkers) {
                    tools.register(Arc::new(tool));
                }
            }
        }

        Ok(tools)
    }

    /// Resolve every agent and tool before any model call is made
    fn validate(&self, runtime: &AgentRuntime) -> Result<()> {
        for profile in &self.agents {
            runtime.tools().select(&profile.tools)?;
        }
        for task in &self.tasks {
            let profile = self.profile(&task.agent)?;
            runtime.tools().select(task.effective_tools(&profile.tools))?;
        }
        Ok(())
    }

    /// Run every task in order and collect the outputs
    pub async fn kickoff(&self, runtime: &AgentRuntime) -> Result<CrewOutput> {
        let run_id = Uuid::new_v4();
        let span = info_span!("crew_run", %run_id, tasks = self.tasks.len());
        self.run(runtime, run_id).instrument(span).await
    }

    async fn run(&self, runtime: &AgentRuntime, run_id: Uuid) -> Result<CrewOutput> {
        self.validate(runtime)?;

        let total = self.tasks.len();
        let mut transcript = Transcript::new();
        let mut outputs = Vec::with_capacity(total);

        for (index, task) in self.tasks.iter().enumerate() {
            let profile = self.profile(&task.agent)?;
            let tools = self.task_tools(runtime, task, profile)?;
            info!(
                task = %task.id,
                agent = %profile.role,
                tools = ?tools.names(),
                "task started"
            );
            if let Some(handler) = &self.event_handler {
                handler.on_task_start(index, total, task, profile).await;
            }

            let agent = runtime.create_tool_agent(&profile.role, profile.system_prompt(), tools);
            let raw = agent.process(task.prompt(), &transcript).await.map_err(|e| {
                Error::ProcessingFailed(format!("Task '{}' ({}) failed: {e}", task.id, profile.role))
            })?;

            let (output, sentinel_seen) = task.finish_output(&raw);
            if sentinel_seen == Some(false) {
                warn!(task = %task.id, "agent finished without its stop sentinel");
            }

            transcript.push(&task.id, &profile.role, &output);
            let task_output = TaskOutput {
                task_id: task.id.clone(),
                agent: profile.role.clone(),
                output,
                sentinel_seen,
            };
            info!(task = %task.id, output_length = task_output.output.len(), "task completed");
            if let Some(handler) = &self.event_handler {
                handler.on_task_complete(index, total, &task_output).await;
            }
            outputs.push(task_output);
        }

        Ok(CrewOutput {
            run_id,
            tasks: outputs,
            transcript,
        })
    }
}

/// Builder for Crew
#[derive(Default)]
pub struct CrewBuilder {
    agents: Vec<AgentProfile>,
    tasks: Vec<Task>,
    event_handler: Option<Arc<dyn CrewEventHandler>>,
}

impl CrewBuilder {
    pub fn agent(mut self, profile: AgentProfile) -> Self {
        self.agents.push(profile);
        self
    }

    pub fn agents(mut self, profiles: impl IntoIterator<Item = AgentProfile>) -> Self {
        self.agents.extend(profiles);
        self
    }

    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn tasks(mut self, tasks: impl IntoIterator<Item = Task>) -> Self {
        self.tasks.extend(tasks);
        self
    }

    pub fn event_handler(mut self, handler: Arc<dyn CrewEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn build(self) -> Result<Crew> {
        if self.tasks.is_empty() {
            return Err(Error::InitializationFailed("A crew needs at least one task".into()));
        }

        let mut keys = HashSet::new();
        for profile in &self.agents {
            if !keys.insert(profile.key.as_str()) {
                return Err(Error::InitializationFailed(format!(
                    "Duplicate agent key '{}'",
                    profile.key
                )));
            }
        }

        let mut ids = HashSet::new();
        for task in &self.tasks {
            if !ids.insert(task.id.as_str()) {
                return Err(Error::InitializationFailed(format!("Duplicate task id '{}'", task.id)));
            }
            if !keys.contains(task.agent.as_str()) {
                return Err(Error::InitializationFailed(format!(
                    "Task '{}' is assigned to unknown agent '{}'",
                    task.id, task.agent
                )));
            }
        }

        Ok(Crew {
            agents: self.agents,
            tasks: self.tasks,
            event_handler: self.event_handler,
        })
    }
}
