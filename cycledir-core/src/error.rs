//! Error types for cycledir.

use thiserror::Error;

/// Errors that can occur in cycledir operations.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid user id '{0}'")]
    InvalidUserId(String),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("A period starting {0} is already recorded")]
    DuplicateRecord(String),

    #[error("No period starting {0} is recorded")]
    RecordNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for cycledir operations.
pub type CycleResult<T> = Result<T, CycleError>;
