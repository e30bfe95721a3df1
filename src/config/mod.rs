//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `COUPON_MANAGER` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use coupon_manager::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, HTTP limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection. When absent the service runs on the
    /// in-memory store.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COUPON_MANAGER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `COUPON_MANAGER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `COUPON_MANAGER__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    fn from_env() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COUPON_MANAGER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any section is invalid, or if production
    /// runs without a database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        match &self.database {
            Some(database) => database.validate()?,
            None if self.is_production() => {
                return Err(ValidationError::DatabaseRequiredInProduction)
            }
            None => {}
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize tests that touch them
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 4] = [
        "COUPON_MANAGER__SERVER__PORT",
        "COUPON_MANAGER__SERVER__ENVIRONMENT",
        "COUPON_MANAGER__DATABASE__URL",
        "COUPON_MANAGER__DATABASE__MAX_CONNECTIONS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::from_env();
        clear_env();
        result
    }

    #[test]
    fn loads_defaults_without_variables() {
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.database.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn loads_nested_values() {
        let config = load_with(&[
            ("COUPON_MANAGER__SERVER__PORT", "3000"),
            ("COUPON_MANAGER__DATABASE__URL", "postgres://localhost/coupons"),
            ("COUPON_MANAGER__DATABASE__MAX_CONNECTIONS", "4"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/coupons");
        assert_eq!(database.max_connections, 4);
    }

    #[test]
    fn production_requires_database() {
        let config = load_with(&[("COUPON_MANAGER__SERVER__ENVIRONMENT", "production")]).unwrap();

        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::DatabaseRequiredInProduction)
        );
    }

    #[test]
    fn production_with_database_is_valid() {
        let config = load_with(&[
            ("COUPON_MANAGER__SERVER__ENVIRONMENT", "production"),
            ("COUPON_MANAGER__DATABASE__URL", "postgresql://db/coupons"),
        ])
        .unwrap();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_database_section_fails_validation() {
        let config = AppConfig {
            database: Some(DatabaseConfig {
                url: "mysql://db".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }
}
