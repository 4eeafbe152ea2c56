//! Authentication configuration.

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Session token validation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the platform gateway
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("auth.jwt_secret"));
        }
        if *environment == Environment::Production && self.jwt_secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        let config = AuthConfig { jwt_secret: String::new() };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn short_secret_is_fine_outside_production() {
        let config = AuthConfig { jwt_secret: "dev-secret".to_string() };
        config.validate(&Environment::Development).unwrap();
    }

    #[test]
    fn production_requires_a_long_secret() {
        let config = AuthConfig { jwt_secret: "short".to_string() };
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwtSecretTooShort)
        ));

        let config = AuthConfig {
            jwt_secret: "a".repeat(32),
        };
        config.validate(&Environment::Production).unwrap();
    }
}
