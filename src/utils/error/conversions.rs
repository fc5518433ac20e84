//! Type conversions for RedisKitError

use super::types::RedisKitError;

impl From<bincode::Error> for RedisKitError {
    fn from(err: bincode::Error) -> Self {
        RedisKitError::Codec(err.to_string())
    }
}

impl From<url::ParseError> for RedisKitError {
    fn from(err: url::ParseError) -> Self {
        RedisKitError::InvalidUri(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for RedisKitError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        RedisKitError::Timeout(err.to_string())
    }
}

impl From<tokio::task::JoinError> for RedisKitError {
    fn from(err: tokio::task::JoinError) -> Self {
        RedisKitError::Internal(format!("Background task failed: {}", err))
    }
}
