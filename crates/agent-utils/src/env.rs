//! Environment-variable helpers
//!
//! Values may come from the process environment or from a `.env` file
//! loaded with [`load_dotenv`]. Empty values count as unset.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("{0} environment variable not set")]
    Missing(String),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Load `.env` from the current directory or a parent, if there is one
///
/// Variables already set in the process win over the file.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read .env file");
            None
        }
    }
}

/// Value of `key`, treating empty strings as unset
pub fn optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Value of `key`, or [`EnvError::Missing`]
pub fn required(key: &str) -> Result<String, EnvError> {
    optional(key).ok_or_else(|| EnvError::Missing(key.to_string()))
}

/// Parse `key` if present
pub fn parsed<T>(key: &str) -> Result<Option<T>, EnvError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional(key)
        .map(|value| {
            value.parse::<T>().map_err(|e| EnvError::Invalid {
                key: key.to_string(),
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
