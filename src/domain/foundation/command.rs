//! Command metadata flowing through application handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Context that accompanies every command: who is acting, how the request
/// correlates across log lines, and where it originated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command, e.g. "api" or "scheduler".
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the acting user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: add a correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: add a source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Test fixture with a fixed user and correlation id.
    pub fn test_fixture() -> Self {
        Self::new(UserId::new("test-user-123").unwrap())
            .with_correlation_id("test-correlation-id")
            .with_source("test")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chain_sets_fields() {
        let metadata = CommandMetadata::new(UserId::new("user-1").unwrap())
            .with_correlation_id("corr-1")
            .with_source("scheduler");

        assert_eq!(metadata.correlation_id(), "corr-1");
        assert_eq!(metadata.source(), Some("scheduler"));
    }

    #[test]
    fn correlation_id_is_generated_when_missing() {
        let metadata = CommandMetadata::new(UserId::new("user-2").unwrap());
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn serialization_skips_unset_fields() {
        let metadata = CommandMetadata::new(UserId::new("user-3").unwrap());
        let json = serde_json::to_string(&metadata).unwrap();

        assert!(json.contains("user_id"));
        assert!(!json.contains("correlation_id"));
        assert!(!json.contains("source"));
    }
}
