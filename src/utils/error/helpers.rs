//! Helper functions for creating and classifying errors

use super::types::RedisKitError;

impl RedisKitError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_uri<S: Into<String>>(message: S) -> Self {
        Self::InvalidUri(message.into())
    }

    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection(message.into())
    }

    pub fn codec<S: Into<String>>(message: S) -> Self {
        Self::Codec(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::Unsupported(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl RedisKitError {
    /// The server rejected the command because the key holds another type
    pub fn is_wrong_type(&self) -> bool {
        match self {
            Self::Redis(e) => e.kind() == redis::ErrorKind::TypeError || e.code() == Some("WRONGTYPE"),
            _ => false,
        }
    }

    /// Transport-level failure: dropped connection, refused dial, timeout
    pub fn is_connection_error(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout(_) => true,
            Self::Redis(e) => e.is_io_error() || e.is_connection_dropped() || e.is_timeout(),
            _ => false,
        }
    }

    /// Payload could not be encoded or decoded
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Self::Codec(_))
    }
}
