//! Ordered record of what each task in a run produced
//!
//! A `Transcript` replaces implicit shared memory between agents: the crew
//! owns it, appends one entry per finished task, and hands a shared reference
//! to every later agent so it can build on earlier conclusions.

use serde::{Deserialize, Serialize};

/// Output of a single finished task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Identifier of the task that produced this output
    pub task_id: String,
    /// Role of the agent that ran the task
    pub agent: String,
    /// Final text the agent returned
    pub output: String,
}

/// Append-only log of task outputs, in execution order
///
/// # Example
///
/// ```
/// use agent_core::Transcript;
///
/// let mut transcript = Transcript::new();
/// transcript.push("valuation", "Valuation Equity Analyst", "BUY");
///
/// assert_eq!(transcript.len(), 1);
/// assert_eq!(transcript.last().map(|e| e.output.as_str()), Some("BUY"));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the output of a finished task
    pub fn push(
        &mut self,
        task_id: impl Into<String>,
        agent: impl Into<String>,
        output: impl Into<String>,
    ) {
        self.entries.push(TranscriptEntry {
            task_id: task_id.into(),
            agent: agent.into(),
            output: output.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Find the output of a task by id
    pub fn get(&self, task_id: &str) -> Option<&TranscriptEntry> {
        self.entries.iter().find(|e| e.task_id == task_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render earlier outputs as a context block for the next prompt
    ///
    /// Returns `None` when nothing has run yet.
    pub fn render_context(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        let mut out = String::from("Context from earlier tasks:\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "\n### {} ({})\n{}\n",
                entry.agent,
                entry.task_id,
                entry.output.trim()
            ));
        }
        Some(out)
    }
}
