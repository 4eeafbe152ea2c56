//! Mock session validator for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Resolves fixed tokens to fixed users; everything else is rejected.
#[derive(Default)]
pub struct MockSessionValidator {
    users: HashMap<String, AuthenticatedUser>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: registers a token that resolves to the given user id.
    pub fn with_user(mut self, token: impl Into<String>, user_id: &str) -> Self {
        let id = UserId::new(user_id).expect("mock user id must be non-empty");
        let user = AuthenticatedUser::new(id, format!("{}@example.com", user_id), None);
        self.users.insert(token.into(), user);
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_token_resolves() {
        let validator = MockSessionValidator::new().with_user("token-1", "user-1");

        let user = validator.validate("token-1").await.unwrap();
        assert_eq!(user.id.as_str(), "user-1");
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let validator = MockSessionValidator::new();
        assert!(validator.validate("nope").await.is_err());
    }
}
