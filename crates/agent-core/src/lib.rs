//! Core abstractions for the agent crew workspace
//!
//! This crate defines the fundamental traits and types shared by the engine
//! and domain crates.

pub mod agent;
pub mod error;
pub mod transcript;

pub use agent::Agent;
pub use error::{Error, Result};
pub use transcript::{Transcript, TranscriptEntry};
