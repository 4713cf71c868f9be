//! Results of a crew run

use agent_core::Transcript;
use serde::Serialize;
use uuid::Uuid;

/// Output of one finished task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutput {
    pub task_id: String,
    /// Role of the agent that ran it
    pub agent: String,
    /// Final text with any stop sentinel removed
    pub output: String,
    /// `Some(seen)` when the task declared a stop sentinel
    pub sentinel_seen: Option<bool>,
}

/// Everything a crew run produced
#[derive(Debug, Clone, Serialize)]
pub struct CrewOutput {
    pub run_id: Uuid,
    pub tasks: Vec<TaskOutput>,
    pub transcript: Transcript,
}

impl CrewOutput {
    /// Output of the last task, which is the crew's answer
    pub fn final_output(&self) -> &str {
        self.tasks.last().map_or("", |t| t.output.as_str())
    }

    /// Whether the last task ended with its stop sentinel
    ///
    /// `false` when the last task has no sentinel.
    pub fn consensus_reached(&self) -> bool {
        self.tasks
            .last()
            .and_then(|t| t.sentinel_seen)
            .unwrap_or(false)
    }

    pub fn task(&self, task_id: &str) -> Option<&TaskOutput> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(sentinel_seen: Option<bool>) -> CrewOutput {
        CrewOutput {
            run_id: Uuid::nil(),
            tasks: vec![
                TaskOutput {
                    task_id: "valuation".into(),
                    agent: "Valuation Equity Analyst".into(),
                    output: "BUY".into(),
                    sentinel_seen: None,
                },
                TaskOutput {
                    task_id: "debate".into(),
                    agent: "Debate Moderator".into(),
                    output: "Consensus: BUY".into(),
                    sentinel_seen,
                },
            ],
            transcript: Transcript::new(),
        }
    }

    #[test]
    fn test_final_output_and_consensus() {
        let out = output(Some(true));
        assert_eq!(out.final_output(), "Consensus: BUY");
        assert!(out.consensus_reached());
        assert_eq!(out.task("valuation").unwrap().output, "BUY");

        assert!(!output(Some(false)).consensus_reached());
        assert!(!output(None).consensus_reached());
    }
}
