//! Tool framework for the agent crew
//!
//! Tools are the data-access functions a model may call while working on a
//! task. A [`ToolRegistry`] holds every tool of a crew; each task runs with a
//! subset selected by name.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, parse_params};
