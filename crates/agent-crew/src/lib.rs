//! Sequential multi-agent crews
//!
//! A crew is a fixed list of role-prompted agents and an ordered list of
//! tasks. Tasks run one after another; each agent sees the transcript of the
//! tasks before it. Agents that allow delegation get coworker tools for
//! consulting the other crew members.

pub mod crew;
pub mod delegation;
pub mod output;
pub mod profile;
pub mod task;

pub use crew::{Crew, CrewBuilder, CrewEventHandler};
pub use delegation::{CoworkerMode, CoworkerTool};
pub use output::{CrewOutput, TaskOutput};
pub use profile::AgentProfile;
pub use task::{Task, TaskBuilder};
