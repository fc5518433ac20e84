//! Stream configuration validators

use super::trait_def::Validate;
use crate::config::models::StreamConfig;

impl Validate for StreamConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Stream name cannot be empty".to_string());
        }

        if self.buffer_size == 0 {
            return Err("Stream buffer size must be greater than 0".to_string());
        }

        if self.error_buffer_size == 0 {
            return Err("Stream error buffer size must be greater than 0".to_string());
        }

        if self.retry_base_delay_ms == 0 {
            return Err("Stream retry base delay must be greater than 0".to_string());
        }

        if self.retry_max_delay_ms < self.retry_base_delay_ms {
            return Err("Stream retry max delay must not be below the base delay".to_string());
        }

        Ok(())
    }
}
