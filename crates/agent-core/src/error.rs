//! Error types for agent-core

use thiserror::Error;

/// Result type alias for agent-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent, tool and crew operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Setup failed before any work ran (unknown agent, unknown tool, bad config)
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Work failed while running
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ProcessingFailed(format!("JSON error: {err}"))
    }
}
