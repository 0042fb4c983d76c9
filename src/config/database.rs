//! Database configuration
//!
//! Only the server location and transport options live here. User and
//! password always come from the browser session.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const SSL_MODES: &[&str] = &[
    "disable",
    "allow",
    "prefer",
    "require",
    "verify-ca",
    "verify-full",
];

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL host (`NEON_HOST`)
    #[serde(default)]
    pub host: String,

    /// Database name (`NEON_DBNAME`)
    #[serde(default)]
    pub dbname: String,

    /// PostgreSQL port
    #[serde(default = "default_port")]
    pub port: u16,

    /// libpq-style SSL mode
    #[serde(default = "default_ssl_mode")]
    pub ssl_mode: String,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Reported to the server as `application_name`
    #[serde(default = "default_application_name")]
    pub application_name: String,
}

impl DatabaseConfig {
    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::MissingRequired("NEON_HOST"));
        }
        if self.dbname.trim().is_empty() {
            return Err(ValidationError::MissingRequired("NEON_DBNAME"));
        }
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !SSL_MODES.contains(&self.ssl_mode.as_str()) {
            return Err(ValidationError::InvalidSslMode(self.ssl_mode.clone()));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 120 {
            return Err(ValidationError::InvalidConnectTimeout);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            dbname: String::new(),
            port: default_port(),
            ssl_mode: default_ssl_mode(),
            connect_timeout_secs: default_connect_timeout(),
            application_name: default_application_name(),
        }
    }
}

fn default_port() -> u16 {
    5432
}

fn default_ssl_mode() -> String {
    "prefer".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_application_name() -> String {
    "gym-portal".to_string()
}
