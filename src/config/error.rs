//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid connect timeout")]
    InvalidConnectTimeout,

    #[error("Invalid SSL mode: {0}")]
    InvalidSslMode(String),

    #[error("Invalid session cookie name")]
    InvalidCookieName,

    #[error("Invalid session idle timeout")]
    InvalidIdleTimeout,

    #[error("SECRET_KEY must be at least {0} bytes in production")]
    SecretKeyTooShort(usize),
}
