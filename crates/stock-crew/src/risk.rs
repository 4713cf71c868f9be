//! Investor risk tolerance

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk profile that steers the framing of every analyst task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Averse,
    #[default]
    Neutral,
    Seeking,
}

impl RiskTolerance {
    pub const ALL: [RiskTolerance; 3] = [Self::Averse, Self::Neutral, Self::Seeking];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Averse => "averse",
            Self::Neutral => "neutral",
            Self::Seeking => "seeking",
        }
    }

    /// Form label, e.g. `Risk-Neutral`
    pub fn label(self) -> &'static str {
        match self {
            Self::Averse => "Risk-Averse",
            Self::Neutral => "Risk-Neutral",
            Self::Seeking => "Risk-Seeking",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk tolerance '{0}' (expected averse, neutral or seeking)")]
pub struct ParseRiskError(String);

impl FromStr for RiskTolerance {
    type Err = ParseRiskError;

    /// Case-insensitive; accepts a `risk-`, `risk_` or `risk ` prefix
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let bare = ["risk-", "risk_", "risk "]
            .iter()
            .find_map(|prefix| lowered.strip_prefix(prefix))
            .unwrap_or(&lowered)
            .trim();

        match bare {
            "averse" => Ok(Self::Averse),
            "neutral" => Ok(Self::Neutral),
            "seeking" => Ok(Self::Seeking),
            _ => Err(ParseRiskError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("neutral".parse::<RiskTolerance>().unwrap(), RiskTolerance::Neutral);
        assert_eq!("AVERSE".parse::<RiskTolerance>().unwrap(), RiskTolerance::Averse);
        assert_eq!("Risk-Seeking".parse::<RiskTolerance>().unwrap(), RiskTolerance::Seeking);
        assert_eq!(" risk neutral ".parse::<RiskTolerance>().unwrap(), RiskTolerance::Neutral);
        assert!("reckless".parse::<RiskTolerance>().is_err());
        assert!("".parse::<RiskTolerance>().is_err());
    }

    #[test]
    fn test_labels_round_trip() {
        for risk in RiskTolerance::ALL {
            assert_eq!(risk.label().parse::<RiskTolerance>().unwrap(), risk);
            assert_eq!(risk.to_string().parse::<RiskTolerance>().unwrap(), risk);
        }
        assert_eq!(RiskTolerance::default().to_string(), "neutral");
    }
}
