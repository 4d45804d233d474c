//! Error types for the facial gesture library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid input provided (malformed landmark stream, bad override syntax)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error, always raised at construction time
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Action executor failed to carry out a bound action
    #[error("Action error: {0}")]
    ActionError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
