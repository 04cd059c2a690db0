//! Error types for the workforce ledger

use thiserror::Error;

/// Refusals raised before a snapshot is replaced.
///
/// A validation error always means the store was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Violation number already exists: {0}")]
    DuplicateViolationNumber(String),

    #[error("Plate number already registered: {0}")]
    DuplicatePlateNumber(String),

    #[error("Site name already exists: {0}")]
    DuplicateSiteName(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Stale snapshot: expected version {expected}, store is at {actual}")]
    StaleSnapshot { expected: u64, actual: u64 },

    #[error("Store lock poisoned")]
    StorePoisoned,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(ConfigError::ParseError(err.to_string()))
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(ConfigError::SaveError(err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
