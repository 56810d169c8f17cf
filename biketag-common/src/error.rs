//! Common error types for BikeTag

use thiserror::Error;

/// Common result type for BikeTag operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the BikeTag crates
#[derive(Error, Debug)]
pub enum Error {
    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
