//! Progress lines printed while the crew works

use agent_crew::{AgentProfile, CrewEventHandler, Task, TaskOutput};
use agent_runtime::ExecutorEventHandler;
use async_trait::async_trait;
use serde_json::Value;

/// Writes task and tool progress to stdout
pub struct ConsoleProgress;

#[async_trait]
impl CrewEventHandler for ConsoleProgress {
    async fn on_task_start(&self, index: usize, total: usize, task: &Task, agent: &AgentProfile) {
        println!("\n[{}/{}] {} is working on the {} task...", index + 1, total, agent.role, task.id);
    }

    async fn on_task_complete(&self, index: usize, total: usize, output: &TaskOutput) {
        println!(
            "[{}/{}] {} finished ({} chars)",
            index + 1,
            total,
            output.agent,
            output.output.chars().count()
        );
    }
}

#[async_trait]
impl ExecutorEventHandler for ConsoleProgress {
    async fn on_tool_start(&self, agent: &str, tool: &str, input: &Value) {
        println!("  {agent} -> {tool} {}", preview(&input.to_string(), 80));
    }

    async fn on_tool_done(
        &self,
        _agent: &str,
        tool: &str,
        result: Result<&Value, &str>,
        duration_ms: u64,
    ) {
        match result {
            Ok(_) => println!("  <- {tool} done in {duration_ms} ms"),
            Err(e) => println!("  <- {tool} failed: {}", preview(e, 120)),
        }
    }
}

/// First `max` characters, with an ellipsis when cut
pub fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
