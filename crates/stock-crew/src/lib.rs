//! Multi-agent stock recommendation crew
//!
//! Four role-prompted agents analyse a ticker one after another and end in a
//! BUY/SELL recommendation:
//!
//! 1. Valuation analyst: return and volatility metrics from price history
//! 2. Sentiment analyst: recent news scored by financial keywords
//! 3. Fundamental analyst: income statement, balance sheet and cash flow
//! 4. Debate moderator: consolidates the three views into a final report,
//!    consulting the analysts through coworker tools
//!
//! Each task sees the transcript of the tasks before it. The risk tolerance
//! of the investor selects a framing sentence for every analyst task.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_crew::{RiskTolerance, StockConfig, StockCrew};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let crew = StockCrew::from_config(StockConfig::from_env()?)?;
//!     let report = crew.analyze_stock("TATAMOTORS.NS", RiskTolerance::Neutral).await?;
//!     println!("{}", report.report);
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod crew;
pub mod error;
pub mod model;
pub mod risk;
pub mod tasks;
pub mod tools;

pub use config::StockConfig;
pub use crew::{AnalysisReport, StockCrew, StockCrewBuilder};
pub use error::{Result, StockError};
pub use risk::{ParseRiskError, RiskTolerance};
pub use tasks::build_tasks;
