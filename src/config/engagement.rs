//! Engagement batch tuning.

use serde::Deserialize;

use super::error::ValidationError;

/// Limits for the all-profiles classification mode.
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementConfig {
    /// Maximum profiles processed per batch run
    #[serde(default = "default_batch_page_size")]
    pub batch_page_size: u32,

    /// Profiles classified concurrently within a run
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl EngagementConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.batch_page_size == 0 || self.batch_page_size > 5_000 {
            return Err(ValidationError::InvalidBatchPageSize);
        }
        if self.batch_concurrency == 0 || self.batch_concurrency > 64 {
            return Err(ValidationError::InvalidBatchConcurrency);
        }
        Ok(())
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            batch_page_size: default_batch_page_size(),
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

fn default_batch_page_size() -> u32 {
    500
}

fn default_batch_concurrency() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        EngagementConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let config = EngagementConfig {
            batch_page_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn excessive_concurrency_is_rejected() {
        let config = EngagementConfig {
            batch_concurrency: 128,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
