//! The four crew members
//!
//! Each profile pairs a role prompt with the tools the member may always use.
//! Task-specific tool subsets live with the tasks.

use agent_crew::AgentProfile;

use crate::tools::SCRAPE_WEBSITE;

pub const VALUATION: &str = "valuation";
pub const SENTIMENT: &str = "sentiment";
pub const FUNDAMENTAL: &str = "fundamental";
pub const DEBATE: &str = "debate";

pub fn valuation_agent() -> AgentProfile {
    AgentProfile::new(
        VALUATION,
        "Valuation Equity Analyst",
        "Analyze valuation trends of assets over extended time horizons, identify patterns in \
         valuation metrics, and interpret implications for investors",
        "Expert in technical analysis and quantitative finance with years of experience in \
         identifying market trends and patterns",
    )
}

pub fn sentiment_agent() -> AgentProfile {
    AgentProfile::new(
        SENTIMENT,
        "Sentiment Equity Analyst",
        "Analyze financial news, analyst ratings, and disclosures related to securities, and \
         assess their implications and sentiment for investors",
        "Seasoned analyst specializing in market sentiment and behavioral finance, with \
         expertise in interpreting news impact on stock prices",
    )
    .with_tools([SCRAPE_WEBSITE])
}

pub fn fundamental_agent() -> AgentProfile {
    AgentProfile::new(
        FUNDAMENTAL,
        "Fundamental Financial Equity Analyst",
        "Analyze company fundamentals based on financial reports and disclosures, focusing on \
         cash flow, income, operations, gross margin, and areas of concern",
        "CFA with extensive experience in fundamental analysis and deep understanding of \
         financial statements and business models",
    )
    .with_tools([SCRAPE_WEBSITE])
}

/// Moderator; may delegate to and question the three analysts
pub fn debate_agent() -> AgentProfile {
    AgentProfile::new(
        DEBATE,
        "Debate Moderator",
        "Coordinate specialist agents to reach consensus on stock analysis, ensure all agents \
         speak at least twice, and consolidate inputs into a final report",
        "Experienced portfolio manager skilled at facilitating discussions among analysts with \
         different perspectives and methodologies",
    )
    .with_delegation(true)
}

/// All members in crew order
pub fn crew_agents() -> Vec<AgentProfile> {
    vec![valuation_agent(), sentiment_agent(), fundamental_agent(), debate_agent()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crew_members() {
        let agents = crew_agents();
        let keys: Vec<_> = agents.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, [VALUATION, SENTIMENT, FUNDAMENTAL, DEBATE]);

        assert!(agents[0].tools.is_empty());
        assert_eq!(agents[1].tools, [SCRAPE_WEBSITE]);
        assert_eq!(agents[2].tools, [SCRAPE_WEBSITE]);
        assert!(agents[3].tools.is_empty());

        let delegating: Vec<_> = agents.iter().filter(|a| a.allow_delegation).collect();
        assert_eq!(delegating.len(), 1);
        assert_eq!(delegating[0].role, "Debate Moderator");
    }

    #[test]
    fn test_system_prompt_carries_role_and_goal() {
        let prompt = fundamental_agent().system_prompt();
        assert!(prompt.starts_with("You are Fundamental Financial Equity Analyst."));
        assert!(prompt.contains("gross margin"));
    }
}
