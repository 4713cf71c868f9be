//! Role descriptors for crew members

use serde::{Deserialize, Serialize};

/// Who an agent is: role, goal, backstory and the tools it brings along
///
/// Profiles are immutable descriptors. The runtime turns one into a system
/// prompt and a tool subset each time the agent is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Stable identifier tasks refer to
    pub key: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// Tools the agent always has, unless a task overrides them
    #[serde(default)]
    pub tools: Vec<String>,
    /// Whether the agent may consult other crew members
    #[serde(default)]
    pub allow_delegation: bool,
}

impl AgentProfile {
    pub fn new(
        key: impl Into<String>,
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
            allow_delegation: false,
        }
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}. {backstory}\nYour personal goal is: {goal}",
            role = self.role,
            backstory = self.backstory.trim(),
            goal = self.goal.trim(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt() {
        let profile = AgentProfile::new(
            "debate",
            "Debate Moderator",
            "Reach consensus",
            "Experienced portfolio manager",
        )
        .with_delegation(true);

        let prompt = profile.system_prompt();
        assert!(prompt.starts_with("You are Debate Moderator. Experienced portfolio manager"));
        assert!(prompt.ends_with("Your personal goal is: Reach consensus"));
        assert!(profile.allow_delegation);
        assert!(profile.tools.is_empty());
    }

    #[test]
    fn test_with_tools() {
        let profile = AgentProfile::new("s", "r", "g", "b").with_tools(["scrape_website"]);
        assert_eq!(profile.tools, ["scrape_website"]);
    }
}
