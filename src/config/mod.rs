//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GYM_PORTAL_` prefix and nested values use double underscores as separators.
//! The deployment variables `NEON_HOST`, `NEON_DBNAME` and `SECRET_KEY` are read
//! under their plain names and take precedence over prefixed values.
//!
//! # Example
//!
//! ```no_run
//! use gym_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod server;
mod session;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use session::{SessionConfig, MIN_PRODUCTION_KEY_LEN};

use serde::Deserialize;

/// Plain environment variables mapped onto configuration keys.
const PLAIN_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("NEON_HOST", "database.host"),
    ("NEON_DBNAME", "database.dbname"),
    ("SECRET_KEY", "session.secret_key"),
];

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database location (no credentials)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GYM_PORTAL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies `NEON_HOST`, `NEON_DBNAME` and `SECRET_KEY`
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GYM_PORTAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEON_HOST=ep-x.neon.tech` -> `database.host = ep-x.neon.tech`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder().add_source(
            config::Environment::default()
                .prefix("GYM_PORTAL")
                .separator("__"),
        );

        for (var, key) in PLAIN_ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        let config = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.session.validate(self.is_production())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
