//! Core Agent trait definition

use crate::{Result, Transcript};
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// An agent receives a rendered task prompt together with the transcript of
/// everything earlier tasks in the same run produced. The transcript is
/// read-only here; the crew that owns it appends the returned output.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return output
    async fn process(&self, input: String, transcript: &Transcript) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}
