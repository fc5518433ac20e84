//! Validation trait definition

use crate::utils::error::{RedisKitError, Result};

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> std::result::Result<(), String>;

    /// `validate` lifted into the crate error type
    fn check(&self) -> Result<()> {
        self.validate().map_err(RedisKitError::Validation)
    }
}
