//! Units of work assigned to crew members

use agent_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One prompt for one agent
///
/// Built once per run and never mutated. `tools`, when set, replaces the
/// assigned agent's own tools for this task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    pub expected_output: String,
    /// Key of the profile that runs the task
    pub agent: String,
    pub tools: Option<Vec<String>>,
    /// Marker the agent writes when done; stripped from the output
    pub stop_sentinel: Option<String>,
}

impl Task {
    pub fn builder(id: impl Into<String>) -> TaskBuilder {
        TaskBuilder::new(id)
    }

    /// Full user prompt: description followed by the answer criteria
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.description.trim(),
            self.expected_output.trim()
        )
    }

    /// Tool names for this task, given the assigned agent's defaults
    pub fn effective_tools<'a>(&'a self, agent_tools: &'a [String]) -> &'a [String] {
        self.tools.as_deref().unwrap_or(agent_tools)
    }

    /// Strip the stop sentinel from `output`
    ///
    /// Returns the cleaned text and whether the sentinel was present. The
    /// sentinel counts only as a standalone word, optionally quoted, and only
    /// its last such occurrence is removed. Tasks without a sentinel return
    /// the trimmed text and `None`.
    pub fn finish_output(&self, output: &str) -> (String, Option<bool>) {
        let Some(sentinel) = &self.stop_sentinel else {
            return (output.trim().to_string(), None);
        };
        let Some((start, end)) = find_sentinel(output, sentinel) else {
            return (output.trim().to_string(), Some(false));
        };

        let before = &output[..start];
        let after = &output[end..];
        let gap = format!(
            "{}{}",
            &before[before.trim_end().len()..],
            &after[..after.len() - after.trim_start().len()]
        );
        let separator = if gap.contains('\n') { "\n" } else { " " };
        let cleaned = [before.trim(), after.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(separator);
        (cleaned, Some(true))
    }
}

const SENTINEL_QUOTES: [char; 4] = ['"', '\'', '`', '*'];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte range of the last word-bounded `sentinel`, widened over enclosing quotes
fn find_sentinel(output: &str, sentinel: &str) -> Option<(usize, usize)> {
    if sentinel.is_empty() {
        return None;
    }
    let (mut start, mut end) = output.rmatch_indices(sentinel).find_map(|(start, matched)| {
        let end = start + matched.len();
        let bounded_left = !output[..start].chars().next_back().is_some_and(is_word_char);
        let bounded_right = !output[end..].chars().next().is_some_and(is_word_char);
        (bounded_left && bounded_right).then_some((start, end))
    })?;

    while let Some(c) = output[..start].chars().next_back().filter(|c| SENTINEL_QUOTES.contains(c)) {
        start -= c.len_utf8();
    }
    while let Some(c) = output[end..].chars().next().filter(|c| SENTINEL_QUOTES.contains(c)) {
        end += c.len_utf8();
    }
    Some((start, end))
}

/// Builder for Task
#[derive(Debug)]
pub struct TaskBuilder {
    id: String,
    description: Option<String>,
    expected_output: Option<String>,
    agent: Option<String>,
    tools: Option<Vec<String>>,
    stop_sentinel: Option<String>,
}

impl TaskBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            expected_output: None,
            agent: None,
            tools: None,
            stop_sentinel: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = Some(expected.into());
        self
    }

    pub fn agent(mut self, key: impl Into<String>) -> Self {
        self.agent = Some(key.into());
        self
    }

    pub fn tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    pub fn stop_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.stop_sentinel = Some(sentinel.into());
        self
    }

    pub fn build(self) -> Result<Task> {
        let missing = |field: &str| {
            Error::InitializationFailed(format!("Task '{}' is missing {field}", self.id))
        };
        let description = self.description.clone().ok_or_else(|| missing("a description"))?;
        let expected_output = self
            .expected_output
            .clone()
            .ok_or_else(|| missing("an expected output"))?;
        let agent = self.agent.clone().ok_or_else(|| missing("an agent"))?;

        Ok(Task {
            id: self.id,
            description,
            expected_output,
            agent,
            tools: self.tools,
            stop_sentinel: self.stop_sentinel,
        })
    }
}
