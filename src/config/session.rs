//! Session configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Minimum signing key length accepted in production.
pub const MIN_PRODUCTION_KEY_LEN: usize = 32;

/// Longest accepted idle session lifetime (30 days).
pub const MAX_IDLE_TIMEOUT_SECS: u64 = 30 * 24 * 60 * 60;

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Cookie signing key (`SECRET_KEY`)
    #[serde(default = "empty_secret")]
    pub secret_key: SecretString,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Idle lifetime of a server-side session in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl SessionConfig {
    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Validate session configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let key = self.secret_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("SECRET_KEY"));
        }
        if production && key.len() < MIN_PRODUCTION_KEY_LEN {
            return Err(ValidationError::SecretKeyTooShort(MIN_PRODUCTION_KEY_LEN));
        }
        let valid_name = !self.cookie_name.is_empty()
            && self
                .cookie_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid_name {
            return Err(ValidationError::InvalidCookieName);
        }
        if self.idle_timeout_secs == 0 || self.idle_timeout_secs > MAX_IDLE_TIMEOUT_SECS {
            return Err(ValidationError::InvalidIdleTimeout);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret_key: empty_secret(),
            cookie_name: default_cookie_name(),
            idle_timeout_secs: default_idle_timeout(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_cookie_name() -> String {
    "gym_session".to_string()
}

fn default_idle_timeout() -> u64 {
    8 * 60 * 60
}
