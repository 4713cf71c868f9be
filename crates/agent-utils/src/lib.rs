//! Shared utilities for the agent crew workspace
//!
//! Logging setup and environment-variable helpers used by the binaries and
//! the domain configuration.

pub mod env;
pub mod logging;

pub use env::{EnvError, load_dotenv};
pub use logging::{LogFormat, init_tracing};
