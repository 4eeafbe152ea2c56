//! Application configuration.
//!
//! Type-safe configuration loaded from environment variables with the
//! `PULSEPOINT` prefix; nested values use `__` as the separator, e.g.
//! `PULSEPOINT__SERVER__PORT=8080`.

mod auth;
mod database;
mod engagement;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use engagement::EngagementConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (session token secret)
    pub auth: AuthConfig,

    /// Engagement batch tuning
    #[serde(default)]
    pub engagement: EngagementConfig,
}

impl AppConfig {
    /// Loads configuration from the environment, reading `.env` first in
    /// development.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PULSEPOINT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of all sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.engagement.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "PULSEPOINT__DATABASE__URL",
            "postgresql://test@localhost/pulsepoint",
        );
        env::set_var(
            "PULSEPOINT__AUTH__JWT_SECRET",
            "a-development-secret-of-decent-size",
        );
    }

    fn clear_env() {
        for (key, _) in env::vars() {
            if key.starts_with("PULSEPOINT__") {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn loads_with_minimal_env_and_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();

        let config = AppConfig::load().unwrap();
        config.validate().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.engagement.batch_page_size, 500);
        assert!(!config.is_production());

        clear_env();
    }

    #[test]
    fn nested_overrides_are_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        env::set_var("PULSEPOINT__SERVER__PORT", "9090");
        env::set_var("PULSEPOINT__ENGAGEMENT__BATCH_PAGE_SIZE", "50");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.engagement.batch_page_size, 50);

        clear_env();
    }

    #[test]
    fn missing_database_url_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var(
            "PULSEPOINT__AUTH__JWT_SECRET",
            "a-development-secret-of-decent-size",
        );

        assert!(AppConfig::load().is_err());

        clear_env();
    }
}
