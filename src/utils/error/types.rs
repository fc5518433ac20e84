//! Error types for redis-kit

use thiserror::Error;

/// Result type alias for redis-kit
pub type Result<T> = std::result::Result<T, RedisKitError>;

/// Main error type for redis-kit
#[derive(Error, Debug)]
pub enum RedisKitError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed or unsupported connection URI
    #[error("Invalid redis uri: {0}")]
    InvalidUri(String),

    /// Dial, authentication or initial PING failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Errors returned by the redis client for a command
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Stream payload encode/decode errors
    #[error("Codec error: {0}")]
    Codec(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation not available for the current connection mode
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
